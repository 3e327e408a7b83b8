//! Column descriptor model for the SDK

use serde::{Deserialize, Serialize};

/// Storage type tag emitted into documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataType {
    Int64,
    Double,
    Varchar,
    Date,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Int64 => "INT64",
            DataType::Double => "DOUBLE",
            DataType::Varchar => "VARCHAR",
            DataType::Date => "DATE",
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic role of a column in the analytic model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SemanticRole {
    Attribute,
    Measure,
}

/// Default aggregation for measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Aggregation {
    Sum,
}

/// Result of classifying a column's storage kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub data_type: DataType,
    pub role: SemanticRole,
    /// Present iff `role` is `Measure`
    pub aggregation: Option<Aggregation>,
}

/// Fully qualified column reference `(table, column)`
///
/// Both parts are upper-cased so they match warehouse identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnId {
    pub table: String,
    pub column: String,
}

impl ColumnId {
    pub fn new(table: &str, column: &str) -> Self {
        Self {
            table: table.to_uppercase(),
            column: column.to_uppercase(),
        }
    }
}

impl std::fmt::Display for ColumnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}::{}", self.table, self.column)
    }
}

/// Per-column semantic metadata in a model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub id: ColumnId,
    pub display_name: String,
    pub role: SemanticRole,
    pub data_type: DataType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<Aggregation>,
}

impl ColumnDescriptor {
    pub fn new(id: ColumnId, display_name: String, classification: Classification) -> Self {
        Self {
            id,
            display_name,
            role: classification.role,
            data_type: classification.data_type,
            aggregation: classification.aggregation,
        }
    }
}
