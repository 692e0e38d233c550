//! Error types for the mediarec evaluation tool
//!
//! This module provides structured error handling using thiserror, with
//! anyhow errors folded into the catch-all variant.

use thiserror::Error;

/// Main error type for mediarec operations
#[derive(Error, Debug)]
pub enum EvalError {
    /// Store could not be opened
    #[error("Connection error: {0}")]
    Connection(String),

    /// Expected table or column is missing from the store
    #[error("Schema error: table '{table}' {detail}")]
    Schema { table: String, detail: String },

    /// Query failed after the schema was validated
    #[error("Query error: {0}")]
    Query(#[from] rusqlite::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Item key does not have the `{category}_{id}` shape
    #[error("Invalid item key: {0}")]
    InvalidItemKey(String),

    /// Table or column name is not a plain SQL identifier
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for mediarec operations
pub type Result<T> = std::result::Result<T, EvalError>;

/// Convert anyhow::Error to EvalError
impl From<anyhow::Error> for EvalError {
    fn from(err: anyhow::Error) -> Self {
        EvalError::Other(err.to_string())
    }
}

impl EvalError {
    /// Shorthand for a missing table
    pub fn missing_table(table: &str) -> Self {
        EvalError::Schema {
            table: table.to_string(),
            detail: "does not exist".to_string(),
        }
    }

    /// Shorthand for a missing column on an existing table
    pub fn missing_column(table: &str, column: &str) -> Self {
        EvalError::Schema {
            table: table.to_string(),
            detail: format!("has no column '{}'", column),
        }
    }
}
