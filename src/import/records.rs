//! JSON record importer
//!
//! Builds typed tables from row-oriented JSON, the shape the code-execution
//! collaborator hands over (`{"orders_df": [{"ORDER_ID": 1, ...}, ...]}`).

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use super::ImportError;
use crate::models::{ColumnData, ColumnValues, Dataset, StorageKind, TableData};

static DATE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

static DATETIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}:\d{2}(\.\d+)?(Z|[+-]\d{2}:?\d{2})?$").unwrap()
});

/// Parse an ISO 8601 date or date-time string
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    if DATE_REGEX.is_match(value) {
        return NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0));
    }
    if !DATETIME_REGEX.is_match(value) {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Infer the storage kind of a column from its non-null values
fn infer_kind(values: &[Option<&Value>]) -> StorageKind {
    let present: Vec<&Value> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return StorageKind::Text;
    }
    if present.iter().all(|v| v.is_i64()) {
        StorageKind::Int64
    } else if present.iter().all(|v| v.is_number()) {
        StorageKind::Double
    } else if present.iter().all(|v| v.is_boolean()) {
        StorageKind::Boolean
    } else if present
        .iter()
        .all(|v| v.as_str().and_then(parse_date).is_some())
    {
        StorageKind::Date
    } else {
        StorageKind::Text
    }
}

fn render_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn build_values(kind: StorageKind, values: &[Option<&Value>]) -> ColumnValues {
    match kind {
        StorageKind::Int64 => {
            ColumnValues::Int64(values.iter().map(|v| v.and_then(Value::as_i64)).collect())
        }
        StorageKind::Double => {
            ColumnValues::Double(values.iter().map(|v| v.and_then(Value::as_f64)).collect())
        }
        StorageKind::Boolean => {
            ColumnValues::Boolean(values.iter().map(|v| v.and_then(Value::as_bool)).collect())
        }
        StorageKind::Date => ColumnValues::Date(
            values
                .iter()
                .map(|v| v.and_then(Value::as_str).and_then(parse_date))
                .collect(),
        ),
        StorageKind::Text => {
            ColumnValues::Text(values.iter().map(|v| v.map(render_text)).collect())
        }
    }
}

/// Importer turning JSON rows into typed tables
#[derive(Debug, Default)]
pub struct RecordImporter;

impl RecordImporter {
    pub fn new() -> Self {
        Self
    }

    /// Import one table from a slice of JSON objects.
    ///
    /// Column order follows first appearance across rows. Missing keys and
    /// JSON nulls become null cells.
    pub fn import_table(&self, name: &str, rows: &[Value]) -> Result<TableData, ImportError> {
        let mut objects: Vec<&Map<String, Value>> = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            let object = row.as_object().ok_or_else(|| ImportError::InvalidRow {
                table: name.to_string(),
                index,
            })?;
            objects.push(object);
        }

        let mut column_names: Vec<&str> = Vec::new();
        for object in &objects {
            for key in object.keys() {
                if !column_names.contains(&key.as_str()) {
                    column_names.push(key);
                }
            }
        }

        let columns = column_names
            .iter()
            .map(|column| {
                let cells: Vec<Option<&Value>> = objects
                    .iter()
                    .map(|o| o.get(*column).filter(|v| !v.is_null()))
                    .collect();
                let kind = infer_kind(&cells);
                debug!("Column {}.{} inferred as {}", name, column, kind);
                ColumnData::new(*column, build_values(kind, &cells))
            })
            .collect();

        Ok(TableData::new(name, columns)?)
    }

    /// Import a dataset from a JSON object mapping table names to row arrays.
    /// Table order follows the document's key order.
    pub fn import_dataset(&self, value: &Value) -> Result<Dataset, ImportError> {
        let object = value.as_object().ok_or_else(|| {
            ImportError::InvalidStructure("expected an object of table name to rows".to_string())
        })?;

        let mut dataset = Dataset::default();
        for (name, rows) in object {
            let rows = rows.as_array().ok_or_else(|| {
                ImportError::InvalidStructure(format!("table '{}' is not an array of rows", name))
            })?;
            dataset.push(self.import_table(name, rows)?)?;
        }
        Ok(dataset)
    }

    pub fn import_dataset_str(&self, json: &str) -> Result<Dataset, ImportError> {
        let value: Value = serde_json::from_str(json)?;
        self.import_dataset(&value)
    }
}
