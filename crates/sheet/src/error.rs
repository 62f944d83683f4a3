use thiserror::Error;

/// Errors that can occur while addressing or normalizing tables
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid cell notation: {0}")]
    InvalidCellNotation(String),

    #[error("Unsupported table shape: {shape} (supported: matrix, records, labeled matrix, array)")]
    UnsupportedType { shape: String },

    /// Input that cannot be laid out as a rectangle. A record set with no
    /// records reports row 0 with zero cells expected and found.
    #[error("Ragged table: row {row} has {actual} cells, expected {expected}")]
    RaggedTable {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

pub type Result<T> = std::result::Result<T, SheetError>;
