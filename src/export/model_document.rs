//! Model document exporter
//!
//! Field order is significant to the receiving platform, so every document
//! struct declares its fields in emission order.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ExportError, ExportResult, to_yaml};
use crate::models::{
    Aggregation, Cardinality, ColumnDescriptor, DataModel, JoinEdge, JoinType, SemanticRole,
};

/// Index hint emitted for every column
pub const DONT_INDEX: &str = "DONT_INDEX";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SageConfig {
    pub is_sage_enabled: bool,
}

/// Column properties shared by model and table documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProperties {
    pub column_type: SemanticRole,
    pub index_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<Aggregation>,
}

impl ColumnProperties {
    pub fn new(role: SemanticRole, aggregation: Option<Aggregation>) -> Self {
        Self {
            column_type: role,
            index_type: DONT_INDEX.to_string(),
            aggregation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinEntry {
    pub with: String,
    pub on: String,
    #[serde(rename = "type")]
    pub join_type: JoinType,
    pub cardinality: Cardinality,
}

impl From<&JoinEdge> for JoinEntry {
    fn from(edge: &JoinEdge) -> Self {
        Self {
            with: edge.to_table.clone(),
            on: edge.predicate(),
            join_type: edge.join_type,
            cardinality: edge.cardinality,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelTableEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub joins: Vec<JoinEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelColumnEntry {
    pub name: String,
    pub column_id: String,
    pub properties: ColumnProperties,
}

impl From<&ColumnDescriptor> for ModelColumnEntry {
    fn from(column: &ColumnDescriptor) -> Self {
        Self {
            name: column.display_name.clone(),
            column_id: column.id.to_string(),
            properties: ColumnProperties::new(column.role, column.aggregation),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPropertiesEntry {
    pub is_bypass_rls: bool,
    pub join_progressive: bool,
    pub sage_config: SageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelBody {
    pub name: String,
    pub model_tables: Vec<ModelTableEntry>,
    pub columns: Vec<ModelColumnEntry>,
    pub properties: ModelPropertiesEntry,
}

/// Top-level model import payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDocument {
    pub guid: String,
    pub model: ModelBody,
}

impl ModelDocument {
    pub fn from_yaml(content: &str) -> Result<Self, ExportError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn table(&self, name: &str) -> Option<&ModelTableEntry> {
        self.model.model_tables.iter().find(|t| t.name == name)
    }
}

/// Exporter for model documents
#[derive(Debug, Default)]
pub struct ModelDocumentExporter;

impl ModelDocumentExporter {
    pub fn new() -> Self {
        Self
    }

    /// Build the document for a model. Joins are attached to their owning
    /// table entry; tables without joins carry no `joins` key.
    pub fn document(&self, model: &DataModel, guid: Uuid) -> ModelDocument {
        let model_tables = model
            .tables
            .iter()
            .map(|table| ModelTableEntry {
                name: table.name.clone(),
                joins: model.joins_for(&table.name).iter().map(JoinEntry::from).collect(),
            })
            .collect();

        ModelDocument {
            guid: guid.to_string(),
            model: ModelBody {
                name: model.name.clone(),
                model_tables,
                columns: model.columns.iter().map(ModelColumnEntry::from).collect(),
                properties: ModelPropertiesEntry {
                    is_bypass_rls: model.properties.bypass_rls,
                    join_progressive: model.properties.join_progressive,
                    sage_config: SageConfig {
                        is_sage_enabled: model.properties.semantic_search,
                    },
                },
            },
        }
    }

    /// Export with a freshly generated guid
    pub fn export(&self, model: &DataModel) -> Result<ExportResult, ExportError> {
        self.export_with_guid(model, Uuid::new_v4())
    }

    pub fn export_with_guid(&self, model: &DataModel, guid: Uuid) -> Result<ExportResult, ExportError> {
        to_yaml(&self.document(model, guid), "model", guid)
    }
}
