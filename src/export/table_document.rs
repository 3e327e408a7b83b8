//! Table document builder
//!
//! One standalone document per warehouse table. Columns are classified in
//! isolation; no cross-table display-name disambiguation happens here.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model_document::{ColumnProperties, SageConfig};
use super::{ExportError, ExportResult, to_yaml};
use crate::config::ModelConfig;
use crate::inference::classify;
use crate::models::{ColumnData, DataType, TableData};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbColumnProperties {
    pub data_type: DataType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableColumnEntry {
    pub name: String,
    pub db_column_name: String,
    pub properties: ColumnProperties,
    pub db_column_properties: DbColumnProperties,
}

impl From<&ColumnData> for TableColumnEntry {
    fn from(column: &ColumnData) -> Self {
        let classification = classify(column.kind());
        let name = column.name.to_uppercase();
        Self {
            name: name.clone(),
            db_column_name: name,
            properties: ColumnProperties::new(classification.role, classification.aggregation),
            db_column_properties: DbColumnProperties {
                data_type: classification.data_type,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablePropertiesEntry {
    pub sage_config: SageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableBody {
    pub name: String,
    pub db: String,
    pub schema: String,
    pub db_table: String,
    pub connection: ConnectionRef,
    pub columns: Vec<TableColumnEntry>,
    pub properties: TablePropertiesEntry,
}

/// Top-level table import payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDocument {
    pub guid: String,
    pub table: TableBody,
}

impl TableDocument {
    pub fn from_yaml(content: &str) -> Result<Self, ExportError> {
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Builds table documents using the warehouse coordinates from a [`ModelConfig`]
#[derive(Debug)]
pub struct TableDocumentBuilder<'a> {
    config: &'a ModelConfig,
}

impl<'a> TableDocumentBuilder<'a> {
    pub fn new(config: &'a ModelConfig) -> Self {
        Self { config }
    }

    /// Build the document for a table already known by its cleaned identifier
    pub fn build(&self, clean_name: &str, columns: &[ColumnData], guid: Uuid) -> TableDocument {
        let name = clean_name.to_uppercase();
        TableDocument {
            guid: guid.to_string(),
            table: TableBody {
                name: name.clone(),
                db: self.config.database.clone(),
                schema: self.config.schema.clone(),
                db_table: name,
                connection: ConnectionRef {
                    name: self.config.connection.clone(),
                },
                columns: columns.iter().map(TableColumnEntry::from).collect(),
                properties: TablePropertiesEntry {
                    sage_config: SageConfig {
                        is_sage_enabled: false,
                    },
                },
            },
        }
    }

    /// Build the document for a dataset table, deriving its identifier with
    /// the same naming rule the model document uses
    pub fn build_for(&self, table: &TableData, guid: Uuid) -> TableDocument {
        let clean_name = self.config.clean_table_name(&table.name);
        self.build(&clean_name, table.columns(), guid)
    }

    pub fn export(&self, table: &TableData) -> Result<ExportResult, ExportError> {
        self.export_with_guid(table, Uuid::new_v4())
    }

    pub fn export_with_guid(&self, table: &TableData, guid: Uuid) -> Result<ExportResult, ExportError> {
        to_yaml(&self.build_for(table, guid), "table", guid)
    }
}
