//! Arrow interop for labeled matrices
//!
//! A `RecordBatch` is the dataframe of the Arrow ecosystem: named, typed
//! columns. These conversions let it flow in and out of the normalizer as a
//! [`LabeledMatrix`].

use crate::cell::CellValue;
use crate::error::Result;
use crate::table::{check_rectangular, LabeledMatrix, TableLike};
use arrow::array::{
    Array, ArrayRef, BooleanArray, Float32Array, Float64Array, Int16Array, Int32Array,
    Int64Array, Int8Array, LargeStringArray, RecordBatch, StringArray, UInt16Array, UInt32Array,
    UInt64Array, UInt8Array,
};
use arrow::datatypes::{DataType, Field, Schema};
use std::sync::Arc;

impl LabeledMatrix {
    /// Read a record batch row by row. Field names become the columns.
    #[must_use]
    pub fn from_record_batch(batch: &RecordBatch) -> Self {
        let columns = batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect();

        let values = (0..batch.num_rows())
            .map(|row_idx| {
                batch
                    .columns()
                    .iter()
                    .map(|array| arrow_array_to_cell(array, row_idx))
                    .collect()
            })
            .collect();

        Self { columns, values }
    }

    /// Build a record batch, inferring one Arrow type per column.
    ///
    /// # Errors
    ///
    /// Returns `RaggedTable` if a row is not as wide as `columns`.
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let num_cols = self.columns.len();
        check_rectangular(&self.values, Some(num_cols))?;
        let rows: Vec<&Vec<CellValue>> = self.values.iter().collect();

        let col_types: Vec<DataType> = (0..num_cols)
            .map(|col_idx| infer_column_type(&rows, col_idx))
            .collect();

        let fields: Vec<Field> = self
            .columns
            .iter()
            .zip(&col_types)
            .map(|(name, dtype)| Field::new(name, dtype.clone(), true))
            .collect();
        let schema = Arc::new(Schema::new(fields));

        let arrays: Vec<ArrayRef> = col_types
            .iter()
            .enumerate()
            .map(|(col_idx, dtype)| build_arrow_array(&rows, col_idx, dtype))
            .collect();

        Ok(RecordBatch::try_new(schema, arrays)?)
    }
}

impl From<&RecordBatch> for TableLike {
    fn from(batch: &RecordBatch) -> Self {
        TableLike::Labeled(LabeledMatrix::from_record_batch(batch))
    }
}

/// Convert an Arrow array element at a given index to a CellValue
fn arrow_array_to_cell(array: &ArrayRef, idx: usize) -> CellValue {
    if array.is_null(idx) {
        return CellValue::Null;
    }

    let any = array.as_any();
    match array.data_type() {
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map_or(CellValue::Null, |a| CellValue::Bool(a.value(idx))),
        DataType::Int8 => any
            .downcast_ref::<Int8Array>()
            .map_or(CellValue::Null, |a| CellValue::Int(i64::from(a.value(idx)))),
        DataType::Int16 => any
            .downcast_ref::<Int16Array>()
            .map_or(CellValue::Null, |a| CellValue::Int(i64::from(a.value(idx)))),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map_or(CellValue::Null, |a| CellValue::Int(i64::from(a.value(idx)))),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map_or(CellValue::Null, |a| CellValue::Int(a.value(idx))),
        DataType::UInt8 => any
            .downcast_ref::<UInt8Array>()
            .map_or(CellValue::Null, |a| CellValue::Int(i64::from(a.value(idx)))),
        DataType::UInt16 => any
            .downcast_ref::<UInt16Array>()
            .map_or(CellValue::Null, |a| CellValue::Int(i64::from(a.value(idx)))),
        DataType::UInt32 => any
            .downcast_ref::<UInt32Array>()
            .map_or(CellValue::Null, |a| CellValue::Int(i64::from(a.value(idx)))),
        DataType::UInt64 => any.downcast_ref::<UInt64Array>().map_or(CellValue::Null, |a| {
            // Values past i64::MAX keep their magnitude as floats
            let v = a.value(idx);
            i64::try_from(v).map_or(CellValue::Float(v as f64), CellValue::Int)
        }),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map_or(CellValue::Null, |a| CellValue::Float(f64::from(a.value(idx)))),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map_or(CellValue::Null, |a| CellValue::Float(a.value(idx))),
        DataType::Utf8 => any
            .downcast_ref::<StringArray>()
            .map_or(CellValue::Null, |a| CellValue::String(a.value(idx).to_string())),
        DataType::LargeUtf8 => any
            .downcast_ref::<LargeStringArray>()
            .map_or(CellValue::Null, |a| CellValue::String(a.value(idx).to_string())),
        // For other types, convert to string representation
        _ => match arrow::util::display::array_value_to_string(array, idx) {
            Ok(s) => CellValue::String(s),
            Err(_) => CellValue::String(format!("<{}>", array.data_type())),
        },
    }
}

/// Infer the Arrow DataType for a column based on cell values
fn infer_column_type(rows: &[&Vec<CellValue>], col_idx: usize) -> DataType {
    let mut has_bool = false;
    let mut has_int = false;
    let mut has_float = false;
    let mut has_string = false;

    for row in rows {
        match row.get(col_idx) {
            None | Some(CellValue::Null) => {}
            Some(CellValue::Bool(_)) => has_bool = true,
            Some(CellValue::Int(_)) => has_int = true,
            Some(CellValue::Float(_)) => has_float = true,
            Some(CellValue::String(_)) => has_string = true,
        }
    }

    // Priority: String > Float > Int > Bool (wider types win)
    if has_string || (has_bool && (has_int || has_float)) {
        DataType::Utf8
    } else if has_float {
        DataType::Float64
    } else if has_int {
        DataType::Int64
    } else if has_bool {
        DataType::Boolean
    } else {
        DataType::Utf8 // Default to string for empty/null-only columns
    }
}

/// Build an Arrow array from column data
fn build_arrow_array(rows: &[&Vec<CellValue>], col_idx: usize, dtype: &DataType) -> ArrayRef {
    match dtype {
        DataType::Boolean => {
            let values: Vec<Option<bool>> = rows
                .iter()
                .map(|row| row.get(col_idx).and_then(CellValue::as_bool))
                .collect();
            Arc::new(BooleanArray::from(values))
        }
        DataType::Int64 => {
            let values: Vec<Option<i64>> = rows
                .iter()
                .map(|row| row.get(col_idx).and_then(CellValue::as_int))
                .collect();
            Arc::new(Int64Array::from(values))
        }
        DataType::Float64 => {
            let values: Vec<Option<f64>> = rows
                .iter()
                .map(|row| row.get(col_idx).and_then(CellValue::as_float))
                .collect();
            Arc::new(Float64Array::from(values))
        }
        _ => {
            let values: Vec<Option<String>> = rows
                .iter()
                .map(|row| {
                    row.get(col_idx)
                        .filter(|cell| !cell.is_null())
                        .map(CellValue::as_str)
                })
                .collect();
            Arc::new(StringArray::from(values))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::normalize;

    fn sample_batch() -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("name", DataType::Utf8, true),
            Field::new("score", DataType::Float64, true),
            Field::new("rank", DataType::Int32, false),
        ]));
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec![Some("Alice"), None])),
                Arc::new(Float64Array::from(vec![Some(95.5), Some(87.0)])),
                Arc::new(Int32Array::from(vec![1, 2])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_from_record_batch() {
        let labeled = LabeledMatrix::from_record_batch(&sample_batch());
        assert_eq!(labeled.columns, vec!["name", "score", "rank"]);
        assert_eq!(
            labeled.values[0],
            vec![
                CellValue::from("Alice"),
                CellValue::Float(95.5),
                CellValue::Int(1)
            ]
        );
        assert!(labeled.values[1][0].is_null());
    }

    #[test]
    fn test_record_batch_normalizes_with_header() {
        let batch = sample_batch();
        let table = normalize(&TableLike::from(&batch)).unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.rows()[0][2], CellValue::from("rank"));
    }

    #[test]
    fn test_to_record_batch_types() {
        let labeled = LabeledMatrix::new(
            vec!["id".to_string(), "ok".to_string(), "note".to_string()],
            vec![
                vec![CellValue::Int(1), CellValue::Bool(true), CellValue::Null],
                vec![CellValue::Int(2), CellValue::Null, CellValue::from("x")],
            ],
        );
        let batch = labeled.to_record_batch().unwrap();
        let schema = batch.schema();
        assert_eq!(schema.field(0).data_type(), &DataType::Int64);
        assert_eq!(schema.field(1).data_type(), &DataType::Boolean);
        assert_eq!(schema.field(2).data_type(), &DataType::Utf8);
        assert!(batch.column(2).is_null(0));

        let back = LabeledMatrix::from_record_batch(&batch);
        assert_eq!(back, labeled);
    }

    #[test]
    fn test_to_record_batch_no_rows() {
        let labeled = LabeledMatrix::new(vec!["a".to_string()], Vec::new());
        let batch = labeled.to_record_batch().unwrap();
        assert_eq!(batch.num_rows(), 0);
        assert_eq!(batch.schema().field(0).data_type(), &DataType::Utf8);
    }
}
