//! Tabular core for funcbox
//!
//! Turns the table shapes user code tends to hold (rows of cells, lists of
//! records, dataframes, flat arrays) into one canonical row-major table, and
//! addresses that table with spreadsheet A1 ranges.
//!
//! # Examples
//!
//! ## Normalizing records
//!
//! ```
//! use funcbox_sheet::{normalize, CellValue, TableLike};
//! use serde_json::json;
//!
//! let input = TableLike::from_json(&json!([
//!     {"name": "Alice", "age": 30},
//!     {"name": "Bob"},
//! ]))
//! .unwrap();
//!
//! let table = normalize(&input).unwrap();
//! assert_eq!(table.row_count(), 3);
//! assert_eq!(table.col_count(), 2);
//! ```
//!
//! ## Addressing a table
//!
//! ```
//! use funcbox_sheet::{column_label, column_ordinal, table_range};
//!
//! assert_eq!(column_label(28).unwrap(), "AB");
//! assert_eq!(column_ordinal("AB").unwrap(), 28);
//! assert_eq!(table_range(4, 28, None).unwrap().as_deref(), Some("A1:AB4"));
//! ```
//!
//! ## Working with Arrow
//!
//! ```
//! use arrow::array::{Int64Array, RecordBatch};
//! use arrow::datatypes::{DataType, Field, Schema};
//! use funcbox_sheet::{normalize, TableLike};
//! use std::sync::Arc;
//!
//! let schema = Arc::new(Schema::new(vec![Field::new("n", DataType::Int64, false)]));
//! let batch = RecordBatch::try_new(schema, vec![Arc::new(Int64Array::from(vec![1, 2]))]).unwrap();
//!
//! let table = normalize(&TableLike::from(&batch)).unwrap();
//! assert_eq!(table.row_count(), 3);
//! ```
//!
//! All functions here are pure: no I/O and no shared state, so they are
//! safe to call from any thread.

mod a1_notation;
mod cell;
mod columnar;
mod error;
mod shape;
mod table;

/// Re-export column codec, A1 parsing and range building.
pub use a1_notation::{
    column_index_to_letters, column_label, column_ordinal, parse_a1, parse_a1_range,
    table_range, to_a1_notation,
};
/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export table shapes and the normalizer.
pub use table::{normalize, CanonicalTable, Grid, LabeledMatrix, Record, TableLike};
