//! The remote worksheet seam.
//!
//! Authentication, transport and retries live behind these traits. The
//! helpers in this crate only reshape tables and compute ranges.

use crate::error::Result;
use funcbox_sheet::CellValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which worksheet of a spreadsheet to open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorksheetSelector {
    /// 0-based position among the spreadsheet's worksheets.
    Index(usize),
    /// Worksheet title.
    Title(String),
}

impl WorksheetSelector {
    /// Build a selector from an index and an optional title.
    /// A non-empty title takes precedence over the index.
    #[must_use]
    pub fn new(index: usize, title: Option<&str>) -> Self {
        match title {
            Some(title) if !title.is_empty() => Self::Title(title.to_string()),
            _ => Self::Index(index),
        }
    }
}

impl Default for WorksheetSelector {
    fn default() -> Self {
        Self::Index(0)
    }
}

impl fmt::Display for WorksheetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "#{i}"),
            Self::Title(t) => write!(f, "'{t}'"),
        }
    }
}

/// A handle to one remote worksheet.
pub trait Worksheet {
    /// Worksheet title.
    fn title(&self) -> String;

    /// All rendered cell values, trimmed of trailing empty rows and columns
    /// and padded to a rectangle with empty strings.
    fn get_all_values(&self) -> Result<Vec<Vec<String>>>;

    /// Write `rows` into `range` (A1 notation). `rows` must fill the range
    /// exactly.
    fn update(&mut self, range: &str, rows: &[Vec<CellValue>]) -> Result<()>;

    /// Remove every value from the worksheet.
    fn clear(&mut self) -> Result<()>;
}

/// Opens worksheets on a remote spreadsheet service.
pub trait SheetsClient {
    type Worksheet: Worksheet;

    /// Open a worksheet of the spreadsheet identified by `sheet_id`.
    fn open_worksheet(
        &self,
        sheet_id: &str,
        selector: &WorksheetSelector,
    ) -> Result<Self::Worksheet>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_wins_over_index() {
        assert_eq!(
            WorksheetSelector::new(3, Some("Data")),
            WorksheetSelector::Title("Data".to_string())
        );
        assert_eq!(WorksheetSelector::new(3, None), WorksheetSelector::Index(3));
        assert_eq!(WorksheetSelector::new(1, Some("")), WorksheetSelector::Index(1));
    }

    #[test]
    fn test_display() {
        assert_eq!(WorksheetSelector::default().to_string(), "#0");
        assert_eq!(WorksheetSelector::Title("Q1".into()).to_string(), "'Q1'");
    }
}
