//! Error types for the oracle

use thiserror::Error;

/// Oracle-wide error type
///
/// Sparse data is never an error: empty windows and empty books are
/// reported through `Option` results. These variants cover malformed
/// feeds and bad configuration only.
#[derive(Error, Debug)]
pub enum OracleError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid {field}: {message}")]
    InvalidField { field: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl OracleError {
    pub fn parse(msg: impl Into<String>) -> Self {
        OracleError::Parse(msg.into())
    }

    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        OracleError::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        OracleError::Config(msg.into())
    }
}

/// Result type alias for oracle operations
pub type OracleResult<T> = Result<T, OracleError>;
