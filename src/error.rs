//! # Error Types
//!
//! Failures that the chromatin pipeline surfaces to callers. Only structural
//! precondition violations (missing or malformed input data) end up here;
//! degenerate numeric input is absorbed with a default and logged instead.

use thiserror::Error;

/// Errors raised while loading, querying or styling chromatin structures
#[derive(Debug, Error)]
pub enum ChromatinError {
    /// A required column is absent from a loaded table
    #[error("`{0}` column is missing")]
    MissingColumn(String),

    /// A column does not have the same row count as the rest of its table
    #[error("column `{name}` has {actual} rows, expected {expected}")]
    ColumnLength {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// A column exists but holds the wrong kind of data
    #[error("column `{name}` must be {expected}")]
    ColumnType { name: String, expected: &'static str },

    /// A color string that is neither hex, `rgb()`/`rgba()` nor a known name
    #[error("invalid color `{0}`")]
    InvalidColor(String),

    /// A genomic-coordinate string outside the `label[:start-end]` grammar
    #[error("malformed genomic coordinates `{query}`: {reason}")]
    MalformedCoordinates { query: String, reason: String },

    /// A declarative view configuration that failed to deserialize
    #[error("invalid view configuration: {0}")]
    ViewConfig(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, ChromatinError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_message() {
        let err = ChromatinError::MissingColumn("x".to_string());
        assert_eq!(err.to_string(), "`x` column is missing");
    }

    #[test]
    fn test_view_config_error_converts_from_serde() {
        let serde_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: ChromatinError = serde_err.into();
        assert!(matches!(err, ChromatinError::ViewConfig(_)));
    }
}
