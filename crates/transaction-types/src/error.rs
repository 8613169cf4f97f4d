//! Error types for transaction record coercion.

use thiserror::Error;

/// Errors that can occur while coercing a source row into a record.
#[derive(Error, Debug)]
pub enum RowCoercionError {
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Invalid integer in column '{column}': {value:?}")]
    InvalidInteger { column: String, value: String },

    #[error("Invalid float in column '{column}': {value:?}")]
    InvalidFloat { column: String, value: String },

    #[error("JSON encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type alias for coercion operations.
pub type Result<T> = std::result::Result<T, RowCoercionError>;
