//! Block schemas for Arduino LCD operations in a block-based editor.
//!
//! Each block type is described by a [`model::BlockSchema`]: its field rows,
//! dropdown options, tooltip, hue, and the rule that decides which rows are
//! shown. Schemas are collected in a [`registry::BlockRegistry`] and turned
//! into [`instance::BlockInstance`]s for the hosting editor.
//!
//! Pin lists come from a [`board::BoardRegistry`] and every display string
//! from a [`locale::Localizer`], both passed in explicitly.
//!
//! The binary `lcdblocks` lists, exports and builds toolbox XML for the blocks.

pub mod blocks;
pub mod board;
pub mod error;
pub mod generator;
pub mod instance;
pub mod locale;
pub mod model;
pub mod registry;

pub use blocks::SchemaContext;
pub use blocks::lcd::register_lcd_blocks;
pub use error::{BoardError, InstanceError, SchemaError};
pub use instance::{BlockInstance, ConnectedBlock, FieldChange};
pub use registry::BlockRegistry;

/// Registry holding the LCD blocks built for `board` with `messages`.
pub fn lcd_registry(
    board: &dyn board::BoardRegistry,
    messages: &dyn locale::Localizer,
) -> Result<BlockRegistry, SchemaError> {
    let mut registry = BlockRegistry::new();
    register_lcd_blocks(&mut registry, &SchemaContext::new(board, messages))?;
    Ok(registry)
}
