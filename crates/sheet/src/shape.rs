//! Structural discrimination of untyped (JSON) table input.
//!
//! Shapes are checked in a fixed order so that input matching more than one
//! shape always resolves the same way:
//!
//! 1. `{"columns": [...], "data": [[...], ...]}` is a labeled matrix
//! 2. `{"shape": [rows, cols], "data": [...]}` is a flat array
//! 3. an array whose elements are all objects is a record set
//! 4. an array whose elements are all arrays of scalars is a matrix
//!
//! Anything else is rejected with `UnsupportedType`, naming the shape found.

use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::table::{Grid, LabeledMatrix, Record, TableLike};
use serde_json::{Map, Value};

impl TableLike {
    /// Discriminate a JSON value into one of the supported table shapes.
    ///
    /// # Example
    /// ```
    /// use funcbox_sheet::TableLike;
    /// use serde_json::json;
    ///
    /// let records = TableLike::from_json(&json!([{"a": 1}, {"b": 2}])).unwrap();
    /// assert_eq!(records.shape_name(), "records");
    ///
    /// let empty = TableLike::from_json(&json!([])).unwrap();
    /// assert_eq!(empty.shape_name(), "matrix");
    ///
    /// assert!(TableLike::from_json(&json!(42)).is_err());
    /// ```
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Object(obj) => object_to_table(obj),
            Value::Array(items) => array_to_table(items),
            other => Err(unsupported(json_shape_name(other))),
        }
    }

    /// Parse a JSON document and discriminate it.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| SheetError::InvalidArgument(format!("Invalid JSON: {e}")))?;
        Self::from_json(&value)
    }
}

fn object_to_table(obj: &Map<String, Value>) -> Result<TableLike> {
    match (obj.get("columns"), obj.get("shape"), obj.get("data")) {
        (Some(Value::Array(columns)), _, Some(Value::Array(data))) => {
            let columns = columns
                .iter()
                .map(|c| match c {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(unsupported(&format!(
                        "labeled matrix with {} column name",
                        json_shape_name(other)
                    ))),
                })
                .collect::<Result<Vec<_>>>()?;
            let values = data
                .iter()
                .map(scalar_row)
                .collect::<Result<Vec<_>>>()?;
            Ok(TableLike::Labeled(LabeledMatrix::new(columns, values)))
        }
        (None, Some(Value::Array(shape)), Some(Value::Array(data))) => {
            let dims: Vec<usize> = shape
                .iter()
                .filter_map(Value::as_u64)
                .filter_map(|n| usize::try_from(n).ok())
                .collect();
            let &[rows, cols] = dims.as_slice() else {
                return Err(unsupported("array with non 2-D shape"));
            };
            if dims.len() != shape.len() {
                return Err(unsupported("array with non 2-D shape"));
            }
            let cells = data
                .iter()
                .map(|v| {
                    json_to_cell(v).ok_or_else(|| unsupported("array with nested values"))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(TableLike::Array(Grid::new(rows, cols, cells)?))
        }
        _ => Err(unsupported("object")),
    }
}

fn array_to_table(items: &[Value]) -> Result<TableLike> {
    if !items.is_empty() && items.iter().all(Value::is_object) {
        let records = items
            .iter()
            .filter_map(Value::as_object)
            .map(object_to_record)
            .collect::<Result<Vec<_>>>()?;
        return Ok(TableLike::Records(records));
    }

    if items.iter().all(Value::is_array) {
        let rows = items
            .iter()
            .map(scalar_row)
            .collect::<Result<Vec<_>>>()?;
        return Ok(TableLike::Matrix(rows));
    }

    if items.iter().all(|v| !v.is_array() && !v.is_object()) {
        return Err(unsupported("array of scalars"));
    }
    Err(unsupported("mixed array"))
}

fn object_to_record(obj: &Map<String, Value>) -> Result<Record> {
    obj.iter()
        .map(|(k, v)| {
            json_to_cell(v)
                .map(|cell| (k.clone(), cell))
                .ok_or_else(|| unsupported("records with nested values"))
        })
        .collect()
}

fn scalar_row(row: &Value) -> Result<Vec<CellValue>> {
    let Value::Array(cells) = row else {
        return Err(unsupported(&format!("row of {}", json_shape_name(row))));
    };
    cells
        .iter()
        .map(|v| json_to_cell(v).ok_or_else(|| unsupported("nested array")))
        .collect()
}

/// Convert a JSON scalar to a cell. Returns `None` for arrays and objects.
fn json_to_cell(value: &Value) -> Option<CellValue> {
    Some(match value {
        Value::Null => CellValue::Null,
        Value::Bool(b) => CellValue::Bool(*b),
        Value::Number(n) => n
            .as_i64()
            .map(CellValue::Int)
            .or_else(|| n.as_f64().map(CellValue::Float))
            .unwrap_or(CellValue::Null),
        Value::String(s) => CellValue::String(s.clone()),
        Value::Array(_) | Value::Object(_) => return None,
    })
}

fn json_shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn unsupported(shape: &str) -> SheetError {
    SheetError::UnsupportedType {
        shape: shape.to_string(),
    }
}
