//! Error types for schemas, instances and board profiles.

use thiserror::Error;

use crate::model::ValueType;

/// Structural problems found while validating or registering a schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("block '{block_type}' declares field '{key}' more than once")]
    DuplicateField { block_type: String, key: String },

    #[error("block '{block_type}' declares group '{name}' more than once")]
    DuplicateGroup { block_type: String, name: String },

    #[error("block type '{0}' is already registered")]
    DuplicateBlockType(String),

    #[error("visibility rule of '{block_type}' watches unknown field '{key}'")]
    UnknownRuleField { block_type: String, key: String },

    #[error("visibility rule of '{block_type}' toggles unknown group '{name}'")]
    UnknownRuleGroup { block_type: String, name: String },

    #[error("visibility rule of '{block_type}' starts from invalid value '{value}'")]
    InvalidRuleInitial { block_type: String, value: String },
}

/// Misuse of a block instance by the hosting editor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstanceError {
    #[error("unknown block type '{0}'")]
    UnknownBlockType(String),

    #[error("block '{block_type}' has no field '{key}'")]
    UnknownField { block_type: String, key: String },

    #[error("'{value}' is not an option of field '{key}'")]
    InvalidOption { key: String, value: String },

    #[error("block '{block_type}' has no value input '{key}'")]
    UnknownInput { block_type: String, key: String },

    #[error("input '{key}' does not accept {output:?}")]
    TypeMismatch { key: String, output: ValueType },
}

/// Failures while resolving or loading board profiles.
#[derive(Error, Debug)]
pub enum BoardError {
    #[error("unknown board '{0}'")]
    UnknownBoard(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}
