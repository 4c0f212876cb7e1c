//! Host-side state of one instantiated block.
//!
//! A [`BlockInstance`] stores the current value of every dropdown, the
//! expression connected to every value input, and which named groups are
//! shown. Field groups are fixed at instantiation; afterwards they are only
//! shown or hidden, and hiding a group never clears the values inside it.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::InstanceError;
use crate::model::{BlockSchema, FieldKind, GroupVisibility, ValueType};

/// Expression block plugged into a value input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectedBlock {
    pub block_type: String,
    /// Declared output type; `None` for untyped expressions.
    pub output: Option<ValueType>,
}

impl ConnectedBlock {
    pub fn new(block_type: impl Into<String>, output: Option<ValueType>) -> Self {
        Self {
            block_type: block_type.into(),
            output,
        }
    }
}

/// Notification for a dropdown whose value changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub key: String,
    pub old: Option<String>,
    pub new: String,
}

#[derive(Debug, Clone)]
pub struct BlockInstance {
    schema: Arc<BlockSchema>,
    fields: IndexMap<String, Option<String>>,
    inputs: IndexMap<String, Option<ConnectedBlock>>,
    visibility: GroupVisibility,
}

impl BlockInstance {
    pub fn new(schema: Arc<BlockSchema>) -> Self {
        let mut fields = IndexMap::new();
        let mut inputs = IndexMap::new();
        for def in schema.fields() {
            match &def.kind {
                FieldKind::Dropdown(options) => {
                    fields.insert(def.key.clone(), options.default_value().map(str::to_string));
                }
                FieldKind::ValueInput(_) => {
                    inputs.insert(def.key.clone(), None);
                }
            }
        }

        let visibility: GroupVisibility = schema
            .groups
            .iter()
            .filter_map(|g| g.name.clone())
            .map(|name| (name, true))
            .collect();

        let mut instance = Self {
            schema,
            fields,
            inputs,
            visibility,
        };
        if let Some(rule) = instance.schema.visibility.clone() {
            instance.visibility = rule.on_change(&instance.visibility, None, &rule.initial);
        }
        instance
    }

    pub fn schema(&self) -> &BlockSchema {
        &self.schema
    }

    pub fn block_type(&self) -> &str {
        &self.schema.block_type
    }

    /// Last value set on a dropdown, regardless of whether its group is shown.
    pub fn get_field_value(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(|v| v.as_deref())
    }

    /// Set a dropdown value and deliver the change notification.
    ///
    /// Returns `None` when the value was already current.
    pub fn set_field_value(&mut self, key: &str, value: &str) -> Result<Option<FieldChange>, InstanceError> {
        let def = self.schema.field(key).ok_or_else(|| InstanceError::UnknownField {
            block_type: self.schema.block_type.clone(),
            key: key.to_string(),
        })?;
        let Some(options) = def.options() else {
            return Err(InstanceError::UnknownField {
                block_type: self.schema.block_type.clone(),
                key: key.to_string(),
            });
        };
        if !options.contains(value) {
            return Err(InstanceError::InvalidOption {
                key: key.to_string(),
                value: value.to_string(),
            });
        }

        let slot = self.fields.entry(key.to_string()).or_default();
        if slot.as_deref() == Some(value) {
            return Ok(None);
        }
        let old = slot.replace(value.to_string());
        let change = FieldChange {
            key: key.to_string(),
            old,
            new: value.to_string(),
        };
        self.on_field_changed(&change);
        Ok(Some(change))
    }

    /// Field-change handler: apply the schema's visibility rule when the
    /// changed field is the one it watches. The rule sees the stored value of
    /// the watched field, so visibility always follows what
    /// [`get_field_value`](Self::get_field_value) reports.
    fn on_field_changed(&mut self, change: &FieldChange) {
        let Some(rule) = &self.schema.visibility else {
            return;
        };
        if rule.field != change.key {
            return;
        }
        let Some(current) = self.fields.get(&rule.field).and_then(|v| v.as_deref()) else {
            return;
        };
        let next = rule.on_change(&self.visibility, change.old.as_deref(), current);
        if next != self.visibility {
            tracing::debug!(
                block = %self.schema.block_type,
                value = %current,
                "group visibility changed"
            );
            self.visibility = next;
        }
    }

    /// Plug an expression into a value input, returning the one it replaces.
    pub fn connect_input(
        &mut self,
        key: &str,
        block: ConnectedBlock,
    ) -> Result<Option<ConnectedBlock>, InstanceError> {
        let check = match self.schema.field(key).map(|d| &d.kind) {
            Some(FieldKind::ValueInput(check)) => check,
            _ => {
                return Err(InstanceError::UnknownInput {
                    block_type: self.schema.block_type.clone(),
                    key: key.to_string(),
                });
            }
        };
        if let Some(output) = block.output {
            if !check.accepts(Some(output)) {
                return Err(InstanceError::TypeMismatch {
                    key: key.to_string(),
                    output,
                });
            }
        }
        Ok(self.inputs.entry(key.to_string()).or_default().replace(block))
    }

    pub fn disconnect_input(&mut self, key: &str) -> Option<ConnectedBlock> {
        self.inputs.get_mut(key).and_then(Option::take)
    }

    pub fn get_input_value(&self, key: &str) -> Option<&ConnectedBlock> {
        self.inputs.get(key).and_then(|v| v.as_ref())
    }

    pub fn visibility(&self) -> &GroupVisibility {
        &self.visibility
    }

    /// Unnamed groups are always shown; unknown names report `false`.
    pub fn is_group_visible(&self, name: &str) -> bool {
        self.visibility.get(name).copied().unwrap_or(false)
    }

    pub fn is_field_visible(&self, key: &str) -> bool {
        match self.schema.group_of_field(key) {
            Some(group) => self.is_group_visible(group),
            None => self.schema.field(key).is_some(),
        }
    }

    /// Dropdown values of shown groups, in display order.
    pub fn visible_field_values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().filter_map(|(k, v)| {
            let v = v.as_deref()?;
            self.is_field_visible(k).then_some((k.as_str(), v))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DisplayHue, FieldDefinition, FieldGroup, OptionSet, VisibilityRule};

    fn toggled() -> BlockInstance {
        let mut schema = BlockSchema::new("toggled", DisplayHue::new(50));
        schema.groups.push(
            FieldGroup::dummy().field(FieldDefinition::dropdown("MODE", OptionSet::fixed(["a", "b"]))),
        );
        schema.groups.push(
            FieldGroup::dummy()
                .named("aGroup")
                .field(FieldDefinition::dropdown("A", OptionSet::fixed(["1"]))),
        );
        schema.groups.push(
            FieldGroup::dummy()
                .named("bGroup")
                .field(FieldDefinition::dropdown("B", OptionSet::fixed(["2"]))),
        );
        schema.visibility = Some(VisibilityRule::new("MODE", "a").case("a", "aGroup").case("b", "bGroup"));
        BlockInstance::new(Arc::new(schema))
    }

    #[test]
    fn visibility_follows_stored_value_not_notification() {
        let mut instance = toggled();
        let stale = FieldChange {
            key: "MODE".into(),
            old: Some("a".into()),
            new: "b".into(),
        };
        instance.on_field_changed(&stale);
        assert_eq!(instance.get_field_value("MODE"), Some("a"));
        assert!(instance.is_group_visible("aGroup"));
        assert!(!instance.is_group_visible("bGroup"));
    }

    #[test]
    fn visibility_matches_field_after_each_change() {
        let mut instance = toggled();
        for value in ["b", "b", "a", "b", "a"] {
            instance.set_field_value("MODE", value).unwrap();
            let shown = match instance.get_field_value("MODE") {
                Some("a") => "aGroup",
                Some("b") => "bGroup",
                other => panic!("unexpected MODE {:?}", other),
            };
            let visible: Vec<&str> = instance
                .visibility()
                .iter()
                .filter(|(_, v)| **v)
                .map(|(k, _)| k.as_str())
                .collect();
            assert_eq!(visible, [shown]);
        }
    }

    #[test]
    fn unwatched_field_leaves_visibility_alone() {
        let mut instance = toggled();
        let before = instance.visibility().clone();
        assert!(instance.set_field_value("A", "1").unwrap().is_none());
        assert_eq!(instance.visibility(), &before);
    }
}
