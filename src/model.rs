use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::SchemaError;

// ────────────────────────────────────────────────────────────────────────────
// Value types and type checks
// ────────────────────────────────────────────────────────────────────────────

/// Output type an expression block can declare.
///
/// Mirrors the type names the Arduino editor uses for connection checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Number,
    LargeNumber,
    ShortNumber,
    Decimal,
    Text,
    Character,
    Boolean,
    Array,
}

impl ValueType {
    /// All types accepted where a number is expected.
    pub const NUMERIC: [ValueType; 4] = [
        ValueType::Number,
        ValueType::LargeNumber,
        ValueType::ShortNumber,
        ValueType::Decimal,
    ];

    pub fn is_numeric(self) -> bool {
        Self::NUMERIC.contains(&self)
    }
}

/// Type constraint declared on a value input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TypeCheck {
    /// Any expression may be connected.
    #[default]
    Any,
    /// Only expressions declaring one of these output types.
    OneOf(Vec<ValueType>),
}

impl TypeCheck {
    pub fn numeric() -> Self {
        TypeCheck::OneOf(ValueType::NUMERIC.to_vec())
    }

    /// Check whether a block with the given declared output type may connect.
    ///
    /// Blocks that declare no output type are accepted, matching the editor's
    /// connection rules for untyped expressions.
    pub fn accepts(&self, output: Option<ValueType>) -> bool {
        match (self, output) {
            (TypeCheck::Any, _) => true,
            (TypeCheck::OneOf(_), None) => true,
            (TypeCheck::OneOf(allowed), Some(t)) => allowed.contains(&t),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Fields
// ────────────────────────────────────────────────────────────────────────────

/// Options of a dropdown field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionSet {
    /// A fixed list of literal choices.
    Fixed(Vec<String>),
    /// Digital pins of the board the schema was built for.
    DigitalPins(Vec<String>),
}

impl OptionSet {
    pub fn fixed<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        OptionSet::Fixed(options.into_iter().map(Into::into).collect())
    }

    pub fn options(&self) -> &[String] {
        match self {
            OptionSet::Fixed(v) | OptionSet::DigitalPins(v) => v,
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.options().iter().any(|o| o == value)
    }

    /// First option, or `None` for an empty set (degraded dropdown).
    pub fn default_value(&self) -> Option<&str> {
        self.options().first().map(|s| s.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Dropdown(OptionSet),
    ValueInput(TypeCheck),
}

/// A keyed editable field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub key: String,
    pub kind: FieldKind,
}

impl FieldDefinition {
    pub fn dropdown(key: impl Into<String>, options: OptionSet) -> Self {
        Self {
            key: key.into(),
            kind: FieldKind::Dropdown(options),
        }
    }

    pub fn value_input(key: impl Into<String>, check: TypeCheck) -> Self {
        Self {
            key: key.into(),
            kind: FieldKind::ValueInput(check),
        }
    }

    pub fn options(&self) -> Option<&OptionSet> {
        match &self.kind {
            FieldKind::Dropdown(set) => Some(set),
            FieldKind::ValueInput(_) => None,
        }
    }
}

/// One element of a field group row, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldItem {
    Label(String),
    Field(FieldDefinition),
}

// ────────────────────────────────────────────────────────────────────────────
// Field groups
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupKind {
    /// A row holding only labels and dropdowns.
    Dummy,
    /// A row ending in a socket for a connected expression.
    Value(FieldDefinition),
}

/// A labeled row of fields that can be shown or hidden as a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldGroup {
    /// Groups addressed by a visibility rule carry a name.
    #[serde(default)]
    pub name: Option<String>,
    pub kind: GroupKind,
    pub items: Vec<FieldItem>,
}

impl FieldGroup {
    pub fn dummy() -> Self {
        Self {
            name: None,
            kind: GroupKind::Dummy,
            items: Vec::new(),
        }
    }

    pub fn value(key: impl Into<String>, check: TypeCheck) -> Self {
        Self {
            name: None,
            kind: GroupKind::Value(FieldDefinition::value_input(key, check)),
            items: Vec::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn label(mut self, text: impl Into<String>) -> Self {
        self.items.push(FieldItem::Label(text.into()));
        self
    }

    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.items.push(FieldItem::Field(field));
        self
    }

    /// All field definitions of this group, including the value input.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        let input = match &self.kind {
            GroupKind::Value(def) => Some(def),
            GroupKind::Dummy => None,
        };
        self.items
            .iter()
            .filter_map(|item| match item {
                FieldItem::Field(def) => Some(def),
                FieldItem::Label(_) => None,
            })
            .chain(input)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|item| match item {
            FieldItem::Label(text) => Some(text.as_str()),
            FieldItem::Field(_) => None,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Connections and hue
// ────────────────────────────────────────────────────────────────────────────

/// Which connections a block exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Connections {
    pub previous: bool,
    pub next: bool,
    /// Expression blocks plug into value inputs instead of chaining.
    #[serde(default)]
    pub output: bool,
    #[serde(default)]
    pub output_type: Option<ValueType>,
}

impl Connections {
    /// Chainable above and below, untyped.
    pub fn statement() -> Self {
        Self {
            previous: true,
            next: true,
            output: false,
            output_type: None,
        }
    }

    pub fn is_statement(&self) -> bool {
        self.previous && self.next && !self.output
    }
}

/// HSV hue (0..360) used to color a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayHue(pub u16);

impl DisplayHue {
    pub fn new(hue: u16) -> Self {
        Self(hue % 360)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Visibility
// ────────────────────────────────────────────────────────────────────────────

/// Current visibility of a block's named groups.
pub type GroupVisibility = IndexMap<String, bool>;

/// Shows exactly one of a set of named groups depending on a dropdown value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityRule {
    /// Key of the dropdown that drives the rule.
    pub field: String,
    /// Dropdown value → name of the group that becomes visible.
    pub cases: IndexMap<String, String>,
    /// Value applied when the block is first instantiated.
    pub initial: String,
}

impl VisibilityRule {
    pub fn new(field: impl Into<String>, initial: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            cases: IndexMap::new(),
            initial: initial.into(),
        }
    }

    pub fn case(mut self, value: impl Into<String>, group: impl Into<String>) -> Self {
        self.cases.insert(value.into(), group.into());
        self
    }

    /// Names of all groups this rule toggles.
    pub fn groups(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for group in self.cases.values() {
            if !out.contains(&group.as_str()) {
                out.push(group.as_str());
            }
        }
        out
    }

    /// Compute the visibility after the driving field changed to `new`.
    ///
    /// Only groups the rule toggles are touched. A value without a case
    /// leaves the visibility unchanged.
    pub fn on_change(&self, current: &GroupVisibility, _old: Option<&str>, new: &str) -> GroupVisibility {
        let mut next = current.clone();
        let Some(shown) = self.cases.get(new) else {
            return next;
        };
        for group in self.groups() {
            next.insert(group.to_string(), group == shown.as_str());
        }
        next
    }
}

// ────────────────────────────────────────────────────────────────────────────
// BlockSchema
// ────────────────────────────────────────────────────────────────────────────

/// Static description of a block type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSchema {
    #[serde(rename = "type")]
    pub block_type: String,
    pub help_url: Option<String>,
    pub hue: DisplayHue,
    pub tooltip: String,
    pub groups: Vec<FieldGroup>,
    pub connections: Connections,
    #[serde(default)]
    pub visibility: Option<VisibilityRule>,
}

impl BlockSchema {
    pub fn new(block_type: impl Into<String>, hue: DisplayHue) -> Self {
        Self {
            block_type: block_type.into(),
            help_url: None,
            hue,
            tooltip: String::new(),
            groups: Vec::new(),
            connections: Connections::default(),
            visibility: None,
        }
    }

    /// Iterate every field definition in display order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.groups.iter().flat_map(|g| g.fields())
    }

    pub fn field(&self, key: &str) -> Option<&FieldDefinition> {
        self.fields().find(|f| f.key == key)
    }

    pub fn group(&self, name: &str) -> Option<&FieldGroup> {
        self.groups.iter().find(|g| g.name.as_deref() == Some(name))
    }

    /// Name of the group holding the field with `key`, if that group is named.
    pub fn group_of_field(&self, key: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|g| g.fields().any(|f| f.key == key))
            .and_then(|g| g.name.as_deref())
    }

    /// Check the structural invariants of the schema.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut keys = BTreeSet::new();
        for field in self.fields() {
            if !keys.insert(field.key.as_str()) {
                return Err(SchemaError::DuplicateField {
                    block_type: self.block_type.clone(),
                    key: field.key.clone(),
                });
            }
        }

        let mut names = BTreeSet::new();
        for name in self.groups.iter().filter_map(|g| g.name.as_deref()) {
            if !names.insert(name) {
                return Err(SchemaError::DuplicateGroup {
                    block_type: self.block_type.clone(),
                    name: name.to_string(),
                });
            }
        }

        if let Some(rule) = &self.visibility {
            let Some(driver) = self.field(&rule.field) else {
                return Err(SchemaError::UnknownRuleField {
                    block_type: self.block_type.clone(),
                    key: rule.field.clone(),
                });
            };
            if let Some(group) = rule.groups().into_iter().find(|g| !names.contains(g)) {
                return Err(SchemaError::UnknownRuleGroup {
                    block_type: self.block_type.clone(),
                    name: group.to_string(),
                });
            }
            let valid_initial = driver
                .options()
                .is_some_and(|set| set.contains(&rule.initial));
            if !valid_initial {
                return Err(SchemaError::InvalidRuleInitial {
                    block_type: self.block_type.clone(),
                    value: rule.initial.clone(),
                });
            }
        }
        Ok(())
    }
}
