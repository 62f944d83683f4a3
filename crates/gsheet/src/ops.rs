//! CRUD-style helpers over a [`Worksheet`].

use crate::client::{SheetsClient, Worksheet};
use crate::config::GsheetConfig;
use crate::error::{GsheetError, Result};
use funcbox_sheet::{
    column_index_to_letters, normalize, table_range, to_a1_notation, CellValue, Grid,
    LabeledMatrix, Record, TableLike,
};
use indexmap::IndexSet;
use std::fmt;
use std::str::FromStr;

/// Shapes a worksheet can be read back as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnType {
    #[default]
    ListOfLists,
    ListOfDicts,
    Array,
    DataFrame,
}

impl ReturnType {
    pub const ALL: [ReturnType; 4] = [
        ReturnType::ListOfLists,
        ReturnType::ListOfDicts,
        ReturnType::Array,
        ReturnType::DataFrame,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ReturnType::ListOfLists => "list_of_lists",
            ReturnType::ListOfDicts => "list_of_dicts",
            ReturnType::Array => "array",
            ReturnType::DataFrame => "dataframe",
        }
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReturnType {
    type Err = GsheetError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|rt| rt.as_str() == s)
            .ok_or_else(|| GsheetError::UnsupportedReturnType {
                name: s.to_string(),
                supported: Self::ALL.map(ReturnType::as_str).join(", "),
            })
    }
}

/// A worksheet's contents in the requested shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Formatted {
    ListOfLists(Vec<Vec<String>>),
    ListOfDicts(Vec<Record>),
    Array(Grid),
    DataFrame(LabeledMatrix),
}

impl From<Formatted> for TableLike {
    fn from(formatted: Formatted) -> Self {
        match formatted {
            Formatted::ListOfLists(rows) => TableLike::Matrix(
                rows.into_iter()
                    .map(|row| row.into_iter().map(CellValue::String).collect())
                    .collect(),
            ),
            Formatted::ListOfDicts(records) => TableLike::Records(records),
            Formatted::Array(grid) => TableLike::Array(grid),
            Formatted::DataFrame(labeled) => TableLike::Labeled(labeled),
        }
    }
}

/// Open the worksheet described by `config`.
pub fn get_worksheet<C: SheetsClient>(client: &C, config: &GsheetConfig) -> Result<C::Worksheet> {
    let selector = config.selector();
    tracing::debug!(sheet_id = %config.sheet_id, worksheet = %selector, "opening worksheet");
    client.open_worksheet(&config.sheet_id, &selector)
}

/// Read a worksheet back in the requested shape.
///
/// - `ListOfLists`: rendered values as-is
/// - `ListOfDicts`: first row as keys, numbers and booleans inferred, blanks as `Null`
/// - `Array`: rendered values as a string grid
/// - `DataFrame`: first row as columns, remaining rows as string values
pub fn format_worksheet<W: Worksheet + ?Sized>(
    worksheet: &W,
    return_type: ReturnType,
) -> Result<Formatted> {
    let values = worksheet.get_all_values()?;

    Ok(match return_type {
        ReturnType::ListOfLists => Formatted::ListOfLists(values),
        ReturnType::ListOfDicts => Formatted::ListOfDicts(values_to_records(values)?),
        ReturnType::Array => Formatted::Array(Grid::from_rows(string_cells(values))?),
        ReturnType::DataFrame => {
            let mut rows = values.into_iter();
            let columns = rows.next().unwrap_or_default();
            let values = string_cells(rows.collect());
            Formatted::DataFrame(LabeledMatrix::new(columns, values))
        }
    })
}

/// Replace the whole worksheet with `data`, written from `A1`.
///
/// Returns the range written, or `None` when `data` normalizes to an empty
/// table (the worksheet is still cleared).
pub fn update_entire_worksheet<W: Worksheet + ?Sized>(
    worksheet: &mut W,
    data: &TableLike,
) -> Result<Option<String>> {
    let table = normalize(data)?;
    let range = table.range(None)?;

    worksheet.clear()?;
    if let Some(range) = &range {
        tracing::debug!(
            worksheet = %worksheet.title(),
            shape = data.shape_name(),
            %range,
            "writing entire worksheet"
        );
        worksheet.update(range, table.rows())?;
    }

    Ok(range)
}

/// Append `rows` below the last non-empty row.
///
/// When the worksheet already holds data, every row must be as wide as it.
pub fn append_rows<W: Worksheet + ?Sized>(
    worksheet: &mut W,
    rows: &[Vec<CellValue>],
) -> Result<Option<String>> {
    let current = worksheet.get_all_values()?;
    let width = match current.first() {
        Some(first) => first.len(),
        None => rows.first().map_or(0, Vec::len),
    };

    if let Some(bad) = rows.iter().find(|r| r.len() != width) {
        return Err(GsheetError::LengthMismatch {
            expected: width,
            actual: bad.len(),
        });
    }

    let start = to_a1_notation(current.len(), 0);
    let range = table_range(rows.len(), width, Some(&start))?;
    if let Some(range) = &range {
        tracing::debug!(worksheet = %worksheet.title(), %range, "appending rows");
        worksheet.update(range, rows)?;
    }

    Ok(range)
}

/// Add a column after the last non-empty one: `header` in row 1, `values`
/// beneath it. `values` must cover every existing data row.
pub fn append_column<W: Worksheet + ?Sized>(
    worksheet: &mut W,
    header: &str,
    values: &[CellValue],
) -> Result<String> {
    let current = worksheet.get_all_values()?;
    let data_rows = current.len().saturating_sub(1);
    if !current.is_empty() && values.len() != data_rows {
        return Err(GsheetError::LengthMismatch {
            expected: data_rows,
            actual: values.len(),
        });
    }

    let col = current.first().map_or(0, Vec::len);
    let column: Vec<Vec<CellValue>> = std::iter::once(CellValue::from(header))
        .chain(values.iter().cloned())
        .map(|v| vec![v])
        .collect();

    write_column(worksheet, col, 0, &column)
}

/// Overwrite the values under the column headed `name`, starting at row 2.
///
/// Cells below the last written value are left as they are.
pub fn update_column<W: Worksheet + ?Sized>(
    worksheet: &mut W,
    name: &str,
    values: &[CellValue],
) -> Result<Option<String>> {
    let current = worksheet.get_all_values()?;
    let col = current
        .first()
        .and_then(|header| header.iter().position(|h| h == name))
        .ok_or_else(|| GsheetError::ColumnNotFound(name.to_string()))?;

    if values.is_empty() {
        return Ok(None);
    }

    let column: Vec<Vec<CellValue>> = values.iter().map(|v| vec![v.clone()]).collect();
    write_column(worksheet, col, 1, &column).map(Some)
}

fn write_column<W: Worksheet + ?Sized>(
    worksheet: &mut W,
    col: usize,
    start_row: usize,
    column: &[Vec<CellValue>],
) -> Result<String> {
    let start = to_a1_notation(start_row, col);
    let range = table_range(column.len(), 1, Some(&start))?
        .ok_or_else(|| GsheetError::Backend("empty column write".to_string()))?;

    tracing::debug!(
        worksheet = %worksheet.title(),
        column = %column_index_to_letters(col),
        %range,
        "writing column"
    );
    worksheet.update(&range, column)?;
    Ok(range)
}

/// First row as keys; each following row becomes one record.
fn values_to_records(values: Vec<Vec<String>>) -> Result<Vec<Record>> {
    let mut rows = values.into_iter();
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };

    let mut seen = IndexSet::new();
    for name in &header {
        if !seen.insert(name.as_str()) {
            return Err(GsheetError::DuplicateHeader(name.clone()));
        }
    }

    Ok(rows
        .map(|row| {
            header
                .iter()
                .enumerate()
                .map(|(i, key)| {
                    let value = row.get(i).map_or(CellValue::Null, |v| CellValue::parse(v));
                    (key.clone(), value)
                })
                .collect()
        })
        .collect())
}

fn string_cells(rows: Vec<Vec<String>>) -> Vec<Vec<CellValue>> {
    rows.into_iter()
        .map(|row| row.into_iter().map(CellValue::String).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_type_from_str() {
        assert_eq!(
            "list_of_dicts".parse::<ReturnType>().unwrap(),
            ReturnType::ListOfDicts
        );
        assert_eq!("dataframe".parse::<ReturnType>().unwrap(), ReturnType::DataFrame);

        let err = "csv".parse::<ReturnType>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Return type 'csv' is not supported. Supported return types: \
             list_of_lists, list_of_dicts, array, dataframe"
        );
    }

    #[test]
    fn test_values_to_records() {
        let values = vec![
            vec!["name".to_string(), "age".to_string(), "ok".to_string()],
            vec!["Alice".to_string(), "30".to_string(), "TRUE".to_string()],
            vec!["Bob".to_string(), String::new()],
        ];
        let records = values_to_records(values).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["age"], CellValue::Int(30));
        assert_eq!(records[0]["ok"], CellValue::Bool(true));
        assert_eq!(records[1]["age"], CellValue::Null);
        assert_eq!(records[1]["ok"], CellValue::Null);
    }

    #[test]
    fn test_duplicate_header() {
        let values = vec![vec!["a".to_string(), "a".to_string()]];
        assert!(matches!(
            values_to_records(values),
            Err(GsheetError::DuplicateHeader(name)) if name == "a"
        ));
    }
}
