//! Registry mapping block-type identifiers to their schemas.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{InstanceError, SchemaError};
use crate::instance::BlockInstance;
use crate::model::{BlockSchema, DisplayHue};

/// Ordered set of block schemas, keyed by block type.
///
/// Schemas are validated on registration and shared with every
/// [`BlockInstance`] created from them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BlockRegistry {
    blocks: IndexMap<String, Arc<BlockSchema>>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, schema: BlockSchema) -> Result<(), SchemaError> {
        schema.validate()?;
        if self.blocks.contains_key(&schema.block_type) {
            return Err(SchemaError::DuplicateBlockType(schema.block_type));
        }
        self.blocks.insert(schema.block_type.clone(), Arc::new(schema));
        Ok(())
    }

    pub fn get(&self, block_type: &str) -> Option<&Arc<BlockSchema>> {
        self.blocks.get(block_type)
    }

    /// Block types in registration order.
    pub fn block_types(&self) -> impl Iterator<Item = &str> {
        self.blocks.keys().map(|k| k.as_str())
    }

    pub fn schemas(&self) -> impl Iterator<Item = &BlockSchema> {
        self.blocks.values().map(|s| s.as_ref())
    }

    /// Hue shared by all registered blocks, if they agree on one.
    pub fn common_hue(&self) -> Option<DisplayHue> {
        let mut hues = self.schemas().map(|s| s.hue);
        let first = hues.next()?;
        hues.all(|h| h == first).then_some(first)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn instantiate(&self, block_type: &str) -> Result<BlockInstance, InstanceError> {
        let schema = self
            .get(block_type)
            .ok_or_else(|| InstanceError::UnknownBlockType(block_type.to_string()))?;
        Ok(BlockInstance::new(Arc::clone(schema)))
    }
}
