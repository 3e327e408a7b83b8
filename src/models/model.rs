//! Data model (the assembled analytic model document)

use super::column::ColumnDescriptor;
use super::relationship::JoinEdge;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Origin of a model table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    /// Backed by a dataset table
    Source,
    /// Implicit calendar table joined through day-offset keys
    DateDimension,
}

/// Reference to a table participating in the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRef {
    /// Cleaned, upper-cased identifier (matches the warehouse table name)
    pub name: String,
    /// Dataset table name, `None` for synthetic tables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub kind: TableKind,
}

impl TableRef {
    pub fn source(name: String, source: &str) -> Self {
        Self {
            name,
            source: Some(source.to_string()),
            kind: TableKind::Source,
        }
    }
}

/// Synthetic date dimension attached when any table carries a day-offset key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateDimension {
    pub table: String,
    /// Day-offset key columns the dimension exposes
    pub key_columns: Vec<String>,
    pub calendar_column: String,
}

impl DateDimension {
    pub fn has_column(&self, column: &str) -> bool {
        self.calendar_column.eq_ignore_ascii_case(column)
            || self
                .key_columns
                .iter()
                .any(|k| k.eq_ignore_ascii_case(column))
    }
}

/// Model-level properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelProperties {
    pub bypass_rls: bool,
    pub join_progressive: bool,
    pub semantic_search: bool,
}

impl Default for ModelProperties {
    fn default() -> Self {
        Self {
            bypass_rls: false,
            join_progressive: true,
            semantic_search: true,
        }
    }
}

/// Assembled analytic model: tables, columns, join graph and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataModel {
    pub name: String,
    pub tables: Vec<TableRef>,
    pub columns: Vec<ColumnDescriptor>,
    /// Join edges indexed by owning (`from`) table
    pub joins: BTreeMap<String, Vec<JoinEdge>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_dimension: Option<DateDimension>,
    pub properties: ModelProperties,
}

impl DataModel {
    pub fn table(&self, name: &str) -> Option<&TableRef> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// All join edges in owning-table order; edges owned by tables missing
    /// from the model come last
    pub fn edges(&self) -> impl Iterator<Item = &JoinEdge> {
        let owned = self
            .tables
            .iter()
            .filter_map(|t| self.joins.get(&t.name))
            .flatten();
        let orphaned = self
            .joins
            .iter()
            .filter(|(owner, _)| self.table(owner).is_none())
            .flat_map(|(_, edges)| edges);
        owned.chain(orphaned)
    }

    pub fn joins_for(&self, table: &str) -> &[JoinEdge] {
        self.joins.get(table).map(Vec::as_slice).unwrap_or(&[])
    }
}
