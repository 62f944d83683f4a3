//! In-memory worksheet backend.
//!
//! Behaves like a remote spreadsheet for the purposes of this crate: values
//! come back rendered as strings, the grid grows on writes, and handles to
//! the same worksheet observe each other's updates.

use crate::client::{SheetsClient, Worksheet, WorksheetSelector};
use crate::error::{GsheetError, Result};
use funcbox_sheet::{parse_a1_range, CellValue};
use indexmap::IndexMap;
use std::sync::{Arc, Mutex, MutexGuard};

type Cells = Vec<Vec<CellValue>>;

/// A spreadsheet service held in memory, keyed by spreadsheet id.
#[derive(Debug, Clone, Default)]
pub struct MemoryClient {
    spreadsheets: Arc<Mutex<IndexMap<String, Vec<MemoryWorksheet>>>>,
}

impl MemoryClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a spreadsheet with the given worksheet titles, replacing any
    /// existing one with the same id.
    pub fn create_spreadsheet(&self, sheet_id: &str, titles: &[&str]) -> Result<()> {
        let worksheets = titles.iter().map(|t| MemoryWorksheet::new(t)).collect();
        lock(&self.spreadsheets)?.insert(sheet_id.to_string(), worksheets);
        Ok(())
    }
}

impl SheetsClient for MemoryClient {
    type Worksheet = MemoryWorksheet;

    fn open_worksheet(
        &self,
        sheet_id: &str,
        selector: &WorksheetSelector,
    ) -> Result<MemoryWorksheet> {
        let spreadsheets = lock(&self.spreadsheets)?;
        let worksheets = spreadsheets
            .get(sheet_id)
            .ok_or_else(|| GsheetError::SpreadsheetNotFound(sheet_id.to_string()))?;

        let found = match selector {
            WorksheetSelector::Index(i) => worksheets.get(*i),
            WorksheetSelector::Title(t) => worksheets.iter().find(|ws| &ws.title == t),
        };

        found
            .cloned()
            .ok_or_else(|| GsheetError::WorksheetNotFound(selector.to_string()))
    }
}

/// One in-memory worksheet. Clones share the same cells.
#[derive(Debug, Clone)]
pub struct MemoryWorksheet {
    title: String,
    cells: Arc<Mutex<Cells>>,
}

impl MemoryWorksheet {
    #[must_use]
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            cells: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Raw stored cell at 0-based (row, col), if it was ever written.
    pub fn cell(&self, row: usize, col: usize) -> Result<Option<CellValue>> {
        let cells = lock(&self.cells)?;
        Ok(cells.get(row).and_then(|r| r.get(col)).cloned())
    }
}

impl Worksheet for MemoryWorksheet {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn get_all_values(&self) -> Result<Vec<Vec<String>>> {
        let cells = lock(&self.cells)?;
        let mut rendered: Vec<Vec<String>> = cells
            .iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect();

        // Trim trailing empty rows, then trailing empty columns
        while rendered
            .last()
            .is_some_and(|row| row.iter().all(String::is_empty))
        {
            rendered.pop();
        }
        let width = rendered
            .iter()
            .filter_map(|row| row.iter().rposition(|v| !v.is_empty()))
            .max()
            .map_or(0, |last| last + 1);
        for row in &mut rendered {
            row.resize(width, String::new());
        }

        Ok(rendered)
    }

    fn update(&mut self, range: &str, rows: &[Vec<CellValue>]) -> Result<()> {
        let ((start_row, start_col), (end_row, end_col)) = parse_a1_range(range)?;
        let n_rows = end_row - start_row + 1;
        let n_cols = end_col - start_col + 1;

        if rows.len() != n_rows || rows.iter().any(|r| r.len() != n_cols) {
            return Err(GsheetError::RangeMismatch {
                range: range.to_string(),
                rows: n_rows,
                cols: n_cols,
            });
        }

        let mut cells = lock(&self.cells)?;
        if cells.len() <= end_row {
            cells.resize_with(end_row + 1, Vec::new);
        }
        for (offset, values) in rows.iter().enumerate() {
            let row = &mut cells[start_row + offset];
            if row.len() <= end_col {
                row.resize(end_col + 1, CellValue::Null);
            }
            row[start_col..=end_col].clone_from_slice(values);
        }

        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        lock(&self.cells)?.clear();
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| GsheetError::Backend("worksheet lock poisoned".to_string()))
}
