//! Error types for the board engine
//!
//! Unknown ids are not errors here: every store operation treats a stale id as a
//! silent no-op. Errors are reserved for input that cannot be understood at all.

use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur while parsing or validating board input
#[derive(Debug, Error)]
pub enum BoardError {
    /// Duplicate ID while loading a seed
    #[error("duplicate {item_type} ID: {id}")]
    DuplicateId { item_type: String, id: String },

    /// Unknown verb/noun combination
    #[error("invalid operation: {verb} {noun}")]
    InvalidOperation { verb: String, noun: String },

    /// Parse error
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Missing required field
    #[error("missing required field: {field}")]
    MissingField { field: String },

    /// Invalid field value
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// IO error reading a seed file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML seed error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl BoardError {
    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a duplicate ID error
    pub fn duplicate_id(item_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::DuplicateId {
            item_type: item_type.into(),
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BoardError::duplicate_id("column", "todo");
        assert_eq!(err.to_string(), "duplicate column ID: todo");
    }

    #[test]
    fn test_parse_error() {
        let err = BoardError::parse("unexpected token");
        assert!(err.to_string().contains("unexpected token"));
    }

    #[test]
    fn test_invalid_value() {
        let err = BoardError::invalid_value("title", "must not be blank");
        assert_eq!(err.to_string(), "invalid value for title: must not be blank");
    }
}
