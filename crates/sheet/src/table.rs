//! Table-like inputs and their canonical form.
//!
//! Every accepted shape is normalized into a [`CanonicalTable`]: a header row
//! followed by data rows, all of the same width.

use crate::a1_notation::table_range;
use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// A single record: field name to value.
pub type Record = IndexMap<String, CellValue>;

/// The table shapes accepted by [`normalize`].
#[derive(Debug, Clone, PartialEq)]
pub enum TableLike {
    /// Rows of cells, the first row being the header.
    Matrix(Vec<Vec<CellValue>>),
    /// One mapping per row. Keys need not be uniform across records.
    Records(Vec<Record>),
    /// Explicit column names plus a row-major value matrix.
    Labeled(LabeledMatrix),
    /// Rectangular grid with no embedded header.
    Array(Grid),
}

impl TableLike {
    /// Short name of the shape, used in logs and error messages.
    #[must_use]
    pub fn shape_name(&self) -> &'static str {
        match self {
            TableLike::Matrix(_) => "matrix",
            TableLike::Records(_) => "records",
            TableLike::Labeled(_) => "labeled matrix",
            TableLike::Array(_) => "array",
        }
    }
}

impl From<Vec<Vec<CellValue>>> for TableLike {
    fn from(rows: Vec<Vec<CellValue>>) -> Self {
        TableLike::Matrix(rows)
    }
}

impl From<Vec<Record>> for TableLike {
    fn from(records: Vec<Record>) -> Self {
        TableLike::Records(records)
    }
}

impl From<LabeledMatrix> for TableLike {
    fn from(labeled: LabeledMatrix) -> Self {
        TableLike::Labeled(labeled)
    }
}

impl From<Grid> for TableLike {
    fn from(grid: Grid) -> Self {
        TableLike::Array(grid)
    }
}

/// Column names plus a value matrix, the shape of a dataframe.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LabeledMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<CellValue>>,
}

impl LabeledMatrix {
    #[must_use]
    pub fn new(columns: Vec<String>, values: Vec<Vec<CellValue>>) -> Self {
        Self { columns, values }
    }

    /// Get a column's values by name
    #[must_use]
    pub fn column(&self, name: &str) -> Option<Vec<&CellValue>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.values.iter().filter_map(|row| row.get(idx)).collect())
    }
}

/// A rectangular grid stored row-major in a flat buffer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellValue>,
}

impl Grid {
    /// Create a grid from a flat row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns `RaggedTable` if `cells.len() != rows * cols`, pointing at the
    /// first row that comes up short (or the first row past the end when
    /// there are too many cells).
    pub fn new(rows: usize, cols: usize, cells: Vec<CellValue>) -> Result<Self> {
        let expected = rows.checked_mul(cols).ok_or_else(|| {
            SheetError::InvalidArgument(format!("grid dimensions {rows}x{cols} overflow"))
        })?;
        let len = cells.len();
        if len > expected {
            return Err(SheetError::RaggedTable {
                row: rows,
                expected: 0,
                actual: len - expected,
            });
        }
        if len < expected {
            // cols > 0 here, since expected > len >= 0
            return Err(SheetError::RaggedTable {
                row: len / cols,
                expected: cols,
                actual: len % cols,
            });
        }
        Ok(Self { rows, cols, cells })
    }

    /// Create a grid from nested rows; every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Result<Self> {
        let cols = check_rectangular(&rows, None)?;
        let n_rows = rows.len();
        let cells = rows.into_iter().flatten().collect();
        Ok(Self {
            rows: n_rows,
            cols,
            cells,
        })
    }

    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&CellValue> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col)
    }

    /// Iterate rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> {
        (0..self.rows).map(move |r| &self.cells[r * self.cols..(r + 1) * self.cols])
    }
}

/// Header row plus data rows, all of equal width.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct CanonicalTable {
    rows: Vec<Vec<CellValue>>,
}

impl CanonicalTable {
    /// Number of rows including the header. Zero for an empty table.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the header. Zero for an empty table.
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn header(&self) -> Option<&[CellValue]> {
        self.rows.first().map(Vec::as_slice)
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<Vec<CellValue>> {
        self.rows
    }

    /// Range this table covers when written with its top-left at `start`
    /// (default "A1"). `None` for an empty table.
    pub fn range(&self, start: Option<&str>) -> Result<Option<String>> {
        table_range(self.row_count(), self.col_count(), start)
    }
}

impl From<CanonicalTable> for Vec<Vec<CellValue>> {
    fn from(table: CanonicalTable) -> Self {
        table.rows
    }
}

/// Normalize any table-like input into its canonical form.
///
/// The input is only borrowed, so a failed normalization leaves the
/// caller's data untouched.
///
/// # Example
/// ```
/// use funcbox_sheet::{normalize, CellValue, TableLike};
/// use indexmap::IndexMap;
///
/// let mut first = IndexMap::new();
/// first.insert("a".to_string(), CellValue::Int(1));
/// first.insert("b".to_string(), CellValue::Int(2));
/// let mut second = IndexMap::new();
/// second.insert("a".to_string(), CellValue::Int(3));
///
/// let table = normalize(&TableLike::Records(vec![first, second])).unwrap();
/// assert_eq!(table.row_count(), 3);
/// assert_eq!(table.rows()[2][1], CellValue::Null);
/// ```
pub fn normalize(input: &TableLike) -> Result<CanonicalTable> {
    let rows = match input {
        TableLike::Matrix(rows) => {
            check_rectangular(rows, None)?;
            rows.clone()
        }
        TableLike::Records(records) => records_to_rows(records)?,
        TableLike::Labeled(labeled) => {
            check_rectangular(&labeled.values, Some(labeled.columns.len()))?;
            let header: Vec<CellValue> = labeled
                .columns
                .iter()
                .map(|c| CellValue::String(c.clone()))
                .collect();
            std::iter::once(header)
                .chain(labeled.values.iter().cloned())
                .collect()
        }
        TableLike::Array(grid) => grid.rows().map(<[CellValue]>::to_vec).collect(),
    };

    Ok(CanonicalTable { rows })
}

/// Union of all record keys in first-seen order, then one row per record.
fn records_to_rows(records: &[Record]) -> Result<Vec<Vec<CellValue>>> {
    if records.is_empty() {
        return Err(SheetError::RaggedTable {
            row: 0,
            expected: 0,
            actual: 0,
        });
    }

    let header: IndexSet<&String> = records.iter().flat_map(|r| r.keys()).collect();

    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(
        header
            .iter()
            .map(|name| CellValue::String((*name).clone()))
            .collect(),
    );
    for record in records {
        rows.push(
            header
                .iter()
                .map(|name| record.get(*name).cloned().unwrap_or(CellValue::Null))
                .collect(),
        );
    }

    Ok(rows)
}

/// Check that all rows share one width (or `expected`, if given) and
/// return it. An empty slice has width `expected` or zero.
pub(crate) fn check_rectangular(rows: &[Vec<CellValue>], expected: Option<usize>) -> Result<usize> {
    let width = expected.or_else(|| rows.first().map(Vec::len)).unwrap_or(0);
    for (idx, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(SheetError::RaggedTable {
                row: idx,
                expected: width,
                actual: row.len(),
            });
        }
    }
    Ok(width)
}
