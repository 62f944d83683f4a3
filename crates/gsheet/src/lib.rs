//! # funcbox-gsheet
//!
//! Convenience helpers for reading and writing tables to a remote
//! spreadsheet worksheet.
//!
//! The service itself sits behind the [`SheetsClient`] and [`Worksheet`]
//! traits. This crate normalizes in-memory tables, computes the A1 ranges to
//! write and reshapes values read back. [`MemoryClient`] implements the
//! traits without a network, for tests and offline use.
//!
//! ```
//! use funcbox_gsheet::{
//!     format_worksheet, get_worksheet, update_entire_worksheet, Formatted, GsheetConfig,
//!     MemoryClient, ReturnType,
//! };
//! use funcbox_sheet::TableLike;
//! use serde_json::json;
//!
//! let client = MemoryClient::new();
//! client.create_spreadsheet("key", &["Sheet1"]).unwrap();
//!
//! let config = GsheetConfig::new("creds.json", "key");
//! let mut ws = get_worksheet(&client, &config).unwrap();
//!
//! let data = TableLike::from_json(&json!([{"a": 1, "b": 2}, {"a": 3}])).unwrap();
//! let range = update_entire_worksheet(&mut ws, &data).unwrap();
//! assert_eq!(range.as_deref(), Some("A1:B3"));
//!
//! let Formatted::ListOfDicts(records) = format_worksheet(&ws, ReturnType::ListOfDicts).unwrap()
//! else {
//!     unreachable!()
//! };
//! assert_eq!(records.len(), 2);
//! ```

mod client;
mod config;
mod error;
mod memory;
mod ops;

pub use client::{SheetsClient, Worksheet, WorksheetSelector};
pub use config::{GsheetConfig, CREDENTIALS_ENV, SHEET_ID_ENV};
pub use error::{GsheetError, Result};
pub use memory::{MemoryClient, MemoryWorksheet};
pub use ops::{
    append_column, append_rows, format_worksheet, get_worksheet, update_column,
    update_entire_worksheet, Formatted, ReturnType,
};
