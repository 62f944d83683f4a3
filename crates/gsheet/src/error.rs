//! Error types for worksheet operations.

use funcbox_sheet::SheetError;
use thiserror::Error;

/// Result type for worksheet operations.
pub type Result<T> = std::result::Result<T, GsheetError>;

/// Errors that can occur while reading or writing a worksheet.
#[derive(Debug, Error)]
pub enum GsheetError {
    /// Table normalization or addressing failed.
    #[error(transparent)]
    Sheet(#[from] SheetError),

    #[error("Spreadsheet not found: {0}")]
    SpreadsheetNotFound(String),

    #[error("Worksheet not found: {0}")]
    WorksheetNotFound(String),

    #[error("Return type '{name}' is not supported. Supported return types: {supported}")]
    UnsupportedReturnType { name: String, supported: String },

    #[error("The header row contains duplicate names: {0}")]
    DuplicateHeader(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Data length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Values handed to `update` do not fill the target range exactly.
    #[error("Range {range} expects {rows}x{cols} values")]
    RangeMismatch {
        range: String,
        rows: usize,
        cols: usize,
    },

    /// Failure reported by the worksheet backend.
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
