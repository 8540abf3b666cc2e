//! Columnar table model for query results.
//!
//! A [`TableData`] is a named, ordered sequence of columns; each column
//! holds nullable cells of a single logical type. Row count is uniform
//! across columns and enforced at construction. The Arrow IPC storage
//! encoding lives in [`crate::ipc`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::MessageError;
use crate::genie::ColumnInfo;

/// Logical type of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Text,
    Boolean,
    /// Microsecond-precision UTC timestamp.
    Timestamp,
}

/// Typed, nullable cell storage for one column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Integer(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
    Boolean(Vec<Option<bool>>),
    Timestamp(Vec<Option<DateTime<Utc>>>),
}

impl ColumnValues {
    /// Number of cells in this column.
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Integer(v) => v.len(),
            ColumnValues::Float(v) => v.len(),
            ColumnValues::Text(v) => v.len(),
            ColumnValues::Boolean(v) => v.len(),
            ColumnValues::Timestamp(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            ColumnValues::Integer(_) => ColumnType::Integer,
            ColumnValues::Float(_) => ColumnType::Float,
            ColumnValues::Text(_) => ColumnType::Text,
            ColumnValues::Boolean(_) => ColumnType::Boolean,
            ColumnValues::Timestamp(_) => ColumnType::Timestamp,
        }
    }

    /// Display text for one cell; `None` for a null cell.
    pub fn cell_text(&self, row: usize) -> Option<String> {
        match self {
            ColumnValues::Integer(v) => v.get(row)?.map(|x| x.to_string()),
            ColumnValues::Float(v) => v.get(row)?.map(|x| x.to_string()),
            ColumnValues::Text(v) => v.get(row)?.clone(),
            ColumnValues::Boolean(v) => v.get(row)?.map(|x| x.to_string()),
            ColumnValues::Timestamp(v) => v.get(row)?.map(|x| x.to_rfc3339()),
        }
    }
}

/// One named table column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
}

/// A tabular query result: ordered columns with a uniform row count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableData {
    columns: Vec<Column>,
}

impl TableData {
    /// A table with no columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from columns, enforcing a uniform row count.
    pub fn new(columns: Vec<Column>) -> Result<Self, MessageError> {
        if let Some(first) = columns.first() {
            let expected = first.values.len();
            for col in &columns {
                if col.values.len() != expected {
                    return Err(MessageError::RowCountMismatch {
                        name: col.name.clone(),
                        expected,
                        actual: col.values.len(),
                    });
                }
            }
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// True when the table holds no cells at all.
    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    /// Display text for one row, with `placeholder` standing in for nulls.
    pub fn row_text(&self, row: usize, placeholder: &str) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| {
                c.values
                    .cell_text(row)
                    .unwrap_or_else(|| placeholder.to_string())
            })
            .collect()
    }

    /// Build a table from statement-result column metadata and a
    /// row-major cell array.
    ///
    /// Cells are parsed according to the declared Databricks SQL type;
    /// a column whose declared type cannot be parsed from the actual
    /// cell text falls back to text wholesale, so no data is lost.
    /// Short rows are padded with nulls.
    pub fn from_statement(schema: &[ColumnInfo], rows: &[Vec<Option<String>>]) -> Self {
        let columns = schema
            .iter()
            .enumerate()
            .map(|(idx, info)| {
                let raw: Vec<Option<&str>> = rows
                    .iter()
                    .map(|row| row.get(idx).and_then(|cell| cell.as_deref()))
                    .collect();
                Column {
                    name: info.name.clone(),
                    values: parse_column(&info.type_name, &raw),
                }
            })
            .collect();
        // Uniform by construction: every column spans the same rows.
        Self { columns }
    }
}

/// Map a Databricks SQL type name to the logical column type.
///
/// Type parameters (e.g. `DECIMAL(10,2)`) are ignored.
fn logical_type(type_name: &str) -> ColumnType {
    let base = type_name
        .split('(')
        .next()
        .unwrap_or(type_name)
        .trim()
        .to_ascii_uppercase();
    match base.as_str() {
        "TINYINT" | "SMALLINT" | "INT" | "INTEGER" | "BIGINT" | "LONG" => ColumnType::Integer,
        "FLOAT" | "REAL" | "DOUBLE" | "DECIMAL" | "NUMERIC" => ColumnType::Float,
        "BOOLEAN" => ColumnType::Boolean,
        "TIMESTAMP" | "TIMESTAMP_NTZ" | "DATE" => ColumnType::Timestamp,
        _ => ColumnType::Text,
    }
}

fn parse_column(type_name: &str, raw: &[Option<&str>]) -> ColumnValues {
    let as_text = || ColumnValues::Text(raw.iter().map(|c| c.map(str::to_string)).collect());

    match logical_type(type_name) {
        ColumnType::Integer => parse_cells(raw, |s| s.trim().parse::<i64>().ok())
            .map(ColumnValues::Integer)
            .unwrap_or_else(as_text),
        ColumnType::Float => parse_cells(raw, |s| s.trim().parse::<f64>().ok())
            .map(ColumnValues::Float)
            .unwrap_or_else(as_text),
        ColumnType::Boolean => parse_cells(raw, |s| match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        })
        .map(ColumnValues::Boolean)
        .unwrap_or_else(as_text),
        ColumnType::Timestamp => parse_cells(raw, parse_timestamp)
            .map(ColumnValues::Timestamp)
            .unwrap_or_else(as_text),
        ColumnType::Text => as_text(),
    }
}

/// Parse every non-null cell with `parse`; `None` if any cell fails.
fn parse_cells<T>(
    raw: &[Option<&str>],
    parse: impl Fn(&str) -> Option<T>,
) -> Option<Vec<Option<T>>> {
    raw.iter()
        .map(|cell| match cell {
            None => Some(None),
            Some(s) => parse(s).map(Some),
        })
        .collect()
}

/// Parse the timestamp formats the statement API emits: RFC 3339,
/// a space-separated datetime, or a bare date.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: &str, type_name: &str) -> ColumnInfo {
        ColumnInfo {
            name: name.to_string(),
            type_name: type_name.to_string(),
        }
    }

    #[test]
    fn test_new_rejects_ragged_columns() {
        let err = TableData::new(vec![
            Column {
                name: "a".to_string(),
                values: ColumnValues::Integer(vec![Some(1), Some(2)]),
            },
            Column {
                name: "b".to_string(),
                values: ColumnValues::Text(vec![Some("x".to_string())]),
            },
        ])
        .unwrap_err();
        assert!(matches!(err, MessageError::RowCountMismatch { .. }));
    }

    #[test]
    fn test_empty_table() {
        let table = TableData::empty();
        assert_eq!(table.num_columns(), 0);
        assert_eq!(table.num_rows(), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_from_statement_parses_declared_types() {
        let schema = vec![
            info("pickup_zip", "INT"),
            info("total", "BIGINT"),
            info("fare", "DECIMAL(10,2)"),
            info("flag", "BOOLEAN"),
            info("zone", "STRING"),
        ];
        let rows = vec![
            vec![
                Some("10001".to_string()),
                Some("42".to_string()),
                Some("12.5".to_string()),
                Some("true".to_string()),
                Some("Midtown".to_string()),
            ],
            vec![
                Some("10002".to_string()),
                None,
                Some("7.25".to_string()),
                Some("false".to_string()),
                None,
            ],
        ];

        let table = TableData::from_statement(&schema, &rows);
        assert_eq!(table.num_rows(), 2);
        assert_eq!(
            table.column_names(),
            vec!["pickup_zip", "total", "fare", "flag", "zone"]
        );
        assert_eq!(
            table.columns()[0].values,
            ColumnValues::Integer(vec![Some(10001), Some(10002)])
        );
        assert_eq!(
            table.columns()[1].values,
            ColumnValues::Integer(vec![Some(42), None])
        );
        assert_eq!(
            table.columns()[2].values,
            ColumnValues::Float(vec![Some(12.5), Some(7.25)])
        );
        assert_eq!(
            table.columns()[3].values,
            ColumnValues::Boolean(vec![Some(true), Some(false)])
        );
        assert_eq!(
            table.columns()[4].values,
            ColumnValues::Text(vec![Some("Midtown".to_string()), None])
        );
    }

    #[test]
    fn test_from_statement_unparseable_column_falls_back_to_text() {
        let schema = vec![info("n", "INT")];
        let rows = vec![
            vec![Some("12".to_string())],
            vec![Some("not-a-number".to_string())],
        ];
        let table = TableData::from_statement(&schema, &rows);
        assert_eq!(
            table.columns()[0].values,
            ColumnValues::Text(vec![
                Some("12".to_string()),
                Some("not-a-number".to_string())
            ])
        );
    }

    #[test]
    fn test_from_statement_pads_short_rows_with_nulls() {
        let schema = vec![info("a", "INT"), info("b", "INT")];
        let rows = vec![vec![Some("1".to_string())]];
        let table = TableData::from_statement(&schema, &rows);
        assert_eq!(table.num_rows(), 1);
        assert_eq!(
            table.columns()[1].values,
            ColumnValues::Integer(vec![None])
        );
    }

    #[test]
    fn test_from_statement_timestamps() {
        let schema = vec![info("picked_up_at", "TIMESTAMP")];
        let rows = vec![
            vec![Some("2016-02-14T16:52:13Z".to_string())],
            vec![Some("2016-02-14 17:00:00.250".to_string())],
            vec![None],
        ];
        let table = TableData::from_statement(&schema, &rows);
        match &table.columns()[0].values {
            ColumnValues::Timestamp(v) => {
                assert_eq!(v[0].unwrap().to_rfc3339(), "2016-02-14T16:52:13+00:00");
                assert_eq!(v[1].unwrap().timestamp_subsec_millis(), 250);
                assert!(v[2].is_none());
            }
            other => panic!("expected timestamp column, got {other:?}"),
        }
    }

    #[test]
    fn test_row_text_uses_placeholder_for_nulls() {
        let schema = vec![info("a", "INT"), info("b", "STRING")];
        let rows = vec![vec![Some("1".to_string()), None]];
        let table = TableData::from_statement(&schema, &rows);
        assert_eq!(table.row_text(0, "null"), vec!["1", "null"]);
    }
}
