//! Arrow IPC storage encoding for [`TableData`].
//!
//! A table travels through the session store as text: it is written as
//! a single-batch Arrow IPC file and wrapped in base64 so it can live
//! inside a store that only reliably holds JSON-like scalars. Column
//! names, column order, and per-column logical types survive the
//! round trip exactly.

use std::io::Cursor;
use std::sync::Arc;

use arrow_array::{
    Array, ArrayRef, BooleanArray, Float64Array, Int64Array, RecordBatch, RecordBatchOptions,
    StringArray, TimestampMicrosecondArray,
};
use arrow_ipc::reader::FileReader;
use arrow_ipc::writer::FileWriter;
use arrow_schema::{DataType, Field, Schema, TimeUnit};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::DateTime;

use crate::error::MessageError;
use crate::table::{Column, ColumnValues, TableData};

/// Encode a table as a base64-wrapped Arrow IPC file buffer.
pub fn encode_table(table: &TableData) -> Result<String, MessageError> {
    let mut fields = Vec::with_capacity(table.num_columns());
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(table.num_columns());

    for col in table.columns() {
        let (data_type, array): (DataType, ArrayRef) = match &col.values {
            ColumnValues::Integer(v) => (DataType::Int64, Arc::new(Int64Array::from(v.clone()))),
            ColumnValues::Float(v) => (DataType::Float64, Arc::new(Float64Array::from(v.clone()))),
            ColumnValues::Text(v) => (DataType::Utf8, Arc::new(StringArray::from(v.clone()))),
            ColumnValues::Boolean(v) => {
                (DataType::Boolean, Arc::new(BooleanArray::from(v.clone())))
            }
            ColumnValues::Timestamp(v) => {
                let micros: Vec<Option<i64>> = v
                    .iter()
                    .map(|cell| cell.map(|dt| dt.timestamp_micros()))
                    .collect();
                (
                    DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into())),
                    Arc::new(TimestampMicrosecondArray::from(micros).with_timezone("UTC")),
                )
            }
        };
        fields.push(Field::new(&col.name, data_type, true));
        arrays.push(array);
    }

    let schema = Arc::new(Schema::new(fields));
    // Explicit row count so a zero-column table still encodes.
    let options = RecordBatchOptions::new().with_row_count(Some(table.num_rows()));
    let batch = RecordBatch::try_new_with_options(schema.clone(), arrays, &options)?;

    let mut writer = FileWriter::try_new(Vec::new(), schema.as_ref())?;
    writer.write(&batch)?;
    writer.finish()?;
    let bytes = writer.into_inner()?;

    Ok(STANDARD.encode(bytes))
}

/// Decode a base64-wrapped Arrow IPC file buffer back into a table.
pub fn decode_table(encoded: &str) -> Result<TableData, MessageError> {
    let bytes = STANDARD.decode(encoded)?;
    let reader = FileReader::try_new(Cursor::new(bytes), None)?;
    let schema = reader.schema();

    let mut columns: Vec<Column> = schema
        .fields()
        .iter()
        .map(|field| {
            Ok(Column {
                name: field.name().clone(),
                values: empty_values(field.data_type())?,
            })
        })
        .collect::<Result<_, MessageError>>()?;

    for batch in reader {
        let batch = batch?;
        for (idx, col) in columns.iter_mut().enumerate() {
            append_cells(&mut col.values, batch.column(idx))?;
        }
    }

    TableData::new(columns)
}

fn empty_values(data_type: &DataType) -> Result<ColumnValues, MessageError> {
    match data_type {
        DataType::Int64 => Ok(ColumnValues::Integer(Vec::new())),
        DataType::Float64 => Ok(ColumnValues::Float(Vec::new())),
        DataType::Utf8 => Ok(ColumnValues::Text(Vec::new())),
        DataType::Boolean => Ok(ColumnValues::Boolean(Vec::new())),
        DataType::Timestamp(TimeUnit::Microsecond, _) => Ok(ColumnValues::Timestamp(Vec::new())),
        other => Err(MessageError::UnsupportedColumnType(other.to_string())),
    }
}

fn append_cells(values: &mut ColumnValues, array: &ArrayRef) -> Result<(), MessageError> {
    let type_error = || MessageError::UnsupportedColumnType(array.data_type().to_string());

    match values {
        ColumnValues::Integer(v) => {
            let arr = array
                .as_any()
                .downcast_ref::<Int64Array>()
                .ok_or_else(type_error)?;
            for i in 0..arr.len() {
                v.push((!arr.is_null(i)).then(|| arr.value(i)));
            }
        }
        ColumnValues::Float(v) => {
            let arr = array
                .as_any()
                .downcast_ref::<Float64Array>()
                .ok_or_else(type_error)?;
            for i in 0..arr.len() {
                v.push((!arr.is_null(i)).then(|| arr.value(i)));
            }
        }
        ColumnValues::Text(v) => {
            let arr = array
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(type_error)?;
            for i in 0..arr.len() {
                v.push((!arr.is_null(i)).then(|| arr.value(i).to_string()));
            }
        }
        ColumnValues::Boolean(v) => {
            let arr = array
                .as_any()
                .downcast_ref::<BooleanArray>()
                .ok_or_else(type_error)?;
            for i in 0..arr.len() {
                v.push((!arr.is_null(i)).then(|| arr.value(i)));
            }
        }
        ColumnValues::Timestamp(v) => {
            let arr = array
                .as_any()
                .downcast_ref::<TimestampMicrosecondArray>()
                .ok_or_else(type_error)?;
            for i in 0..arr.len() {
                if arr.is_null(i) {
                    v.push(None);
                } else {
                    let micros = arr.value(i);
                    let dt = DateTime::from_timestamp_micros(micros)
                        .ok_or(MessageError::TimestampOutOfRange(micros))?;
                    v.push(Some(dt));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_table() -> TableData {
        TableData::new(vec![
            Column {
                name: "pickup_zip".to_string(),
                values: ColumnValues::Integer(vec![Some(10001), Some(10002), None]),
            },
            Column {
                name: "fare".to_string(),
                values: ColumnValues::Float(vec![Some(12.5), Some(0.1), None]),
            },
            Column {
                name: "zone".to_string(),
                values: ColumnValues::Text(vec![Some("Midtown".to_string()), None, Some(String::new())]),
            },
            Column {
                name: "shared".to_string(),
                values: ColumnValues::Boolean(vec![Some(true), Some(false), None]),
            },
            Column {
                name: "picked_up_at".to_string(),
                values: ColumnValues::Timestamp(vec![
                    Some(Utc.with_ymd_and_hms(2016, 2, 14, 16, 52, 13).unwrap()),
                    None,
                    Some(Utc.timestamp_micros(1_455_467_533_123_456).unwrap()),
                ]),
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_roundtrip_all_column_types() {
        let table = sample_table();
        let encoded = encode_table(&table).unwrap();
        let decoded = decode_table(&encoded).unwrap();
        assert_eq!(decoded, table);
    }

    #[test]
    fn test_roundtrip_preserves_column_order() {
        let table = sample_table();
        let decoded = decode_table(&encode_table(&table).unwrap()).unwrap();
        assert_eq!(
            decoded.column_names(),
            vec!["pickup_zip", "fare", "zone", "shared", "picked_up_at"]
        );
    }

    #[test]
    fn test_roundtrip_zero_rows_known_columns() {
        let table = TableData::new(vec![
            Column {
                name: "pickup_zip".to_string(),
                values: ColumnValues::Integer(Vec::new()),
            },
            Column {
                name: "total".to_string(),
                values: ColumnValues::Integer(Vec::new()),
            },
        ])
        .unwrap();
        let decoded = decode_table(&encode_table(&table).unwrap()).unwrap();
        assert_eq!(decoded, table);
        assert_eq!(decoded.num_rows(), 0);
        assert_eq!(decoded.column_names(), vec!["pickup_zip", "total"]);
    }

    #[test]
    fn test_roundtrip_zero_column_table() {
        let table = TableData::empty();
        let decoded = decode_table(&encode_table(&table).unwrap()).unwrap();
        assert_eq!(decoded, table);
    }

    #[test]
    fn test_decode_rejects_invalid_base64() {
        let err = decode_table("not valid base64!!!").unwrap_err();
        assert!(matches!(err, MessageError::Base64(_)));
    }

    #[test]
    fn test_decode_rejects_non_arrow_payload() {
        let encoded = STANDARD.encode(b"this is not an arrow buffer");
        let err = decode_table(&encoded).unwrap_err();
        assert!(matches!(err, MessageError::Arrow(_)));
    }
}
