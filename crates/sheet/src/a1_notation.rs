use crate::error::{Result, SheetError};

const BASE: usize = 26;

/// Convert a 1-based column ordinal to its spreadsheet label
/// (1=A, 26=Z, 27=AA, 52=AZ, 703=AAA).
///
/// Labels are bijective base-26: there is no zero digit, so every positive
/// ordinal has exactly one label and vice versa.
pub fn column_label(ordinal: usize) -> Result<String> {
    if ordinal < 1 {
        return Err(SheetError::InvalidArgument(format!(
            "column ordinal must be >= 1, got {ordinal}"
        )));
    }

    let mut n = ordinal;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % BASE;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / BASE;
    }
    letters.reverse();

    Ok(letters.into_iter().map(char::from).collect())
}

/// Convert a spreadsheet column label back to its 1-based ordinal.
/// Lowercase letters are accepted.
pub fn column_ordinal(label: &str) -> Result<usize> {
    if label.is_empty() {
        return Err(SheetError::InvalidArgument(
            "column label must not be empty".to_string(),
        ));
    }

    let mut ordinal: usize = 0;
    for b in label.bytes() {
        let upper = b.to_ascii_uppercase();
        if !upper.is_ascii_uppercase() {
            return Err(SheetError::InvalidArgument(format!(
                "column label must contain only letters A-Z, got '{label}'"
            )));
        }
        let digit = (upper - b'A') as usize + 1;
        ordinal = ordinal
            .checked_mul(BASE)
            .and_then(|n| n.checked_add(digit))
            .ok_or_else(|| {
                SheetError::InvalidArgument(format!("column label '{label}' is too large"))
            })?;
    }

    Ok(ordinal)
}

/// Parse A1-style cell notation (e.g., "A1", "Z99", "AA1")
/// Returns (row, column) as 0-based indices
pub fn parse_a1(notation: &str) -> Result<(usize, usize)> {
    let split_pos = notation
        .bytes()
        .position(|b| b.is_ascii_digit())
        .ok_or_else(|| SheetError::InvalidCellNotation(notation.to_string()))?;

    let (col_part, row_part) = notation.split_at(split_pos);
    if col_part.is_empty() {
        return Err(SheetError::InvalidCellNotation(notation.to_string()));
    }

    let col = column_ordinal(col_part)
        .map_err(|_| SheetError::InvalidCellNotation(notation.to_string()))?;
    let row = row_part
        .parse::<usize>()
        .map_err(|_| SheetError::InvalidCellNotation(notation.to_string()))?;

    // Row must be >= 1
    if row == 0 {
        return Err(SheetError::InvalidCellNotation(notation.to_string()));
    }

    Ok((row - 1, col - 1))
}

/// Parse A1-style range notation (e.g., "A1:C3")
/// Returns ((start_row, start_col), (end_row, end_col)) as 0-based indices
pub fn parse_a1_range(notation: &str) -> Result<((usize, usize), (usize, usize))> {
    let Some((start, end)) = notation.split_once(':') else {
        // No colon: a single cell
        let cell = parse_a1(notation)?;
        return Ok((cell, cell));
    };

    let (start_row, start_col) = parse_a1(start)?;
    let (end_row, end_col) = parse_a1(end)?;

    let actual_start = (start_row.min(end_row), start_col.min(end_col));
    let actual_end = (start_row.max(end_row), start_col.max(end_col));

    Ok((actual_start, actual_end))
}

/// Convert 0-based column index to column letters
/// 0=A, 1=B, ... 25=Z, 26=AA, 27=AB, ...
#[must_use]
pub fn column_index_to_letters(col: usize) -> String {
    // col + 1 is always >= 1, so the ordinal is valid
    column_label(col + 1).unwrap_or_default()
}

/// Convert (row, col) to A1 notation
/// (0, 0) = "A1", (0, 1) = "B1", etc.
#[must_use]
pub fn to_a1_notation(row: usize, col: usize) -> String {
    format!("{}{}", column_index_to_letters(col), row + 1)
}

/// Build the inclusive range covering a `rows` x `cols` block whose
/// top-left corner is `start` (default "A1").
///
/// Returns `None` when either dimension is zero, since an empty table
/// addresses no cells. The start cell is validated either way.
///
/// # Example
/// ```
/// use funcbox_sheet::table_range;
///
/// assert_eq!(table_range(3, 2, None).unwrap().as_deref(), Some("A1:B3"));
/// assert_eq!(table_range(1, 30, Some("A1")).unwrap().as_deref(), Some("A1:AD1"));
/// assert_eq!(table_range(0, 0, None).unwrap(), None);
/// ```
pub fn table_range(rows: usize, cols: usize, start: Option<&str>) -> Result<Option<String>> {
    let (start_row, start_col) = parse_a1(start.unwrap_or("A1"))?;

    if rows == 0 || cols == 0 {
        return Ok(None);
    }

    let overflow = || {
        SheetError::InvalidArgument(format!(
            "a {rows}x{cols} table starting at row {}, column {} overflows the address space",
            start_row + 1,
            start_col + 1
        ))
    };
    let end_col = start_col.checked_add(cols).ok_or_else(overflow)?;
    let end_row = start_row.checked_add(rows).ok_or_else(overflow)?;

    let start_label = column_label(start_col + 1)?;
    let end_label = column_label(end_col)?;

    Ok(Some(format!(
        "{start_label}{}:{end_label}{end_row}",
        start_row + 1
    )))
}
