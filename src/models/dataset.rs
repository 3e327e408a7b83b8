//! Dataset model for the SDK
//!
//! A dataset is the ordered set of tables handed over by the code-execution
//! collaborator. Tables are rectangular and every column holds values of one
//! storage kind.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Error raised when a dataset or table is malformed
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DatasetError {
    #[error("Table '{table}' is not rectangular: column '{column}' has {actual} rows, expected {expected}")]
    RaggedTable {
        table: String,
        column: String,
        expected: usize,
        actual: usize,
    },
    #[error("Table '{table}' has duplicate column '{column}'")]
    DuplicateColumn { table: String, column: String },
    #[error("Duplicate table '{0}' in dataset")]
    DuplicateTable(String),
}

/// Primitive storage kind of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Int64,
    Double,
    Text,
    Boolean,
    Date,
}

impl std::fmt::Display for StorageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKind::Int64 => write!(f, "int64"),
            StorageKind::Double => write!(f, "double"),
            StorageKind::Text => write!(f, "text"),
            StorageKind::Boolean => write!(f, "boolean"),
            StorageKind::Date => write!(f, "date"),
        }
    }
}

/// Homogeneous column values; `None` is a null cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "lowercase")]
pub enum ColumnValues {
    Int64(Vec<Option<i64>>),
    Double(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
    Boolean(Vec<Option<bool>>),
    Date(Vec<Option<NaiveDateTime>>),
}

impl ColumnValues {
    pub fn kind(&self) -> StorageKind {
        match self {
            ColumnValues::Int64(_) => StorageKind::Int64,
            ColumnValues::Double(_) => StorageKind::Double,
            ColumnValues::Text(_) => StorageKind::Text,
            ColumnValues::Boolean(_) => StorageKind::Boolean,
            ColumnValues::Date(_) => StorageKind::Date,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Int64(v) => v.len(),
            ColumnValues::Double(v) => v.len(),
            ColumnValues::Text(v) => v.len(),
            ColumnValues::Boolean(v) => v.len(),
            ColumnValues::Date(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named column of a source table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnData {
    pub name: String,
    pub values: ColumnValues,
}

impl ColumnData {
    pub fn new(name: impl Into<String>, values: ColumnValues) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn kind(&self) -> StorageKind {
        self.values.kind()
    }
}

/// A rectangular source table
///
/// # Example
///
/// ```rust
/// use dataset_model_sdk::models::{ColumnData, ColumnValues, TableData};
///
/// let table = TableData::new(
///     "customers_df",
///     vec![ColumnData::new("CUSTOMER_ID", ColumnValues::Int64(vec![Some(1), Some(2)]))],
/// )
/// .unwrap();
/// assert_eq!(table.row_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableData {
    pub name: String,
    columns: Vec<ColumnData>,
}

impl TableData {
    /// Create a table, checking that every column has the same length and
    /// that column names are unique once upper-cased.
    pub fn new(name: impl Into<String>, columns: Vec<ColumnData>) -> Result<Self, DatasetError> {
        let name = name.into();

        if let Some(first) = columns.first() {
            let expected = first.values.len();
            for column in &columns {
                if column.values.len() != expected {
                    return Err(DatasetError::RaggedTable {
                        table: name,
                        column: column.name.clone(),
                        expected,
                        actual: column.values.len(),
                    });
                }
            }
        }

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.to_uppercase()) {
                return Err(DatasetError::DuplicateColumn {
                    table: name,
                    column: column.name.clone(),
                });
            }
        }

        Ok(Self { name, columns })
    }

    pub fn columns(&self) -> &[ColumnData] {
        &self.columns
    }

    /// Number of rows; a table without columns has none
    pub fn row_count(&self) -> usize {
        self.columns.first().map(|c| c.values.len()).unwrap_or(0)
    }

    /// Case-insensitive column lookup
    pub fn column(&self, name: &str) -> Option<&ColumnData> {
        self.columns
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }
}

/// Ordered collection of source tables
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    tables: Vec<TableData>,
}

impl Dataset {
    pub fn new(tables: Vec<TableData>) -> Result<Self, DatasetError> {
        let mut dataset = Self::default();
        for table in tables {
            dataset.push(table)?;
        }
        Ok(dataset)
    }

    /// Append a table, keeping supply order
    pub fn push(&mut self, table: TableData) -> Result<(), DatasetError> {
        if self.table(&table.name).is_some() {
            return Err(DatasetError::DuplicateTable(table.name));
        }
        self.tables.push(table);
        Ok(())
    }

    pub fn tables(&self) -> &[TableData] {
        &self.tables
    }

    pub fn table(&self, name: &str) -> Option<&TableData> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }
}
