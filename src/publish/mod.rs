//! Publishing pipeline
//!
//! Pushes a dataset to the warehouse and its documents to the analytics
//! platform. Both systems are reached through collaborator traits so the
//! pipeline carries no transport code; configuration is passed explicitly.
//!
//! Order of operations:
//! 1. Insert every table into the warehouse under its cleaned identifier
//! 2. Import one table document per table
//! 3. Import the model document
//!
//! Nothing is rolled back on failure. The error carries a report of the work
//! already done.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::ModelConfig;
use crate::export::{
    ExportError, LiveboardBuilder, ModelDocumentExporter, QuestionSpec, SearchTokenSource,
    TableDocumentBuilder,
};
use crate::inference::{JoinStrategy, ModelAssembler};
use crate::models::{Dataset, TableData};

/// Warehouse write policy for tables that already exist
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IfExists {
    #[default]
    Replace,
    Append,
    Fail,
}

/// Warehouse coordinates handed to the [`Warehouse`] collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarehouseConfig {
    /// Database the tables are written to; table documents reference it too
    pub database: String,
    pub schema: String,
    pub if_exists: IfExists,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            database: "AUTO_CREATE".to_string(),
            schema: "PUBLIC".to_string(),
            if_exists: IfExists::Replace,
        }
    }
}

/// Analytics platform coordinates handed to the [`AnalyticsPlatform`] collaborator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    pub base_url: String,
    /// Organisation identifier, if the platform is multi-tenant
    pub org_id: Option<String>,
}

/// Tabular-data sink
#[async_trait(?Send)]
pub trait Warehouse {
    /// Write the table's rows to `table_name`, honouring `config.if_exists`
    async fn insert_table(
        &self,
        config: &WarehouseConfig,
        table_name: &str,
        table: &TableData,
    ) -> anyhow::Result<()>;
}

/// Document import endpoint of the analytics platform
#[async_trait(?Send)]
pub trait AnalyticsPlatform {
    /// Import one YAML document and return the id of the created object
    async fn import_document(&self, config: &PlatformConfig, document: &str)
    -> anyhow::Result<String>;
}

/// Pipeline stage at which publishing failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishStage {
    WarehouseInsert(String),
    TableImport(String),
    ModelImport,
    LiveboardImport,
    Serialization,
}

impl std::fmt::Display for PublishStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PublishStage::WarehouseInsert(table) => write!(f, "warehouse insert of {}", table),
            PublishStage::TableImport(table) => write!(f, "table document import of {}", table),
            PublishStage::ModelImport => write!(f, "model document import"),
            PublishStage::LiveboardImport => write!(f, "liveboard import"),
            PublishStage::Serialization => write!(f, "document serialization"),
        }
    }
}

/// Work completed by a publish run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublishReport {
    /// Cleaned identifiers of tables inserted into the warehouse
    pub tables: Vec<String>,
    /// Platform ids of imported table documents, in table order
    pub table_guids: Vec<String>,
    /// Platform id of the imported model, once that stage succeeded
    pub model_id: Option<String>,
}

/// Publishing failure with the partial results accumulated before it
#[derive(Debug, thiserror::Error)]
#[error("Publishing failed during {stage}: {source}")]
pub struct PublishError {
    pub stage: PublishStage,
    pub source: Box<dyn std::error::Error + Send + Sync + 'static>,
    pub partial: PublishReport,
}

impl PublishError {
    fn new(
        stage: PublishStage,
        source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
        partial: &PublishReport,
    ) -> Self {
        let error = Self {
            stage,
            source: source.into(),
            partial: partial.clone(),
        };
        warn!("{}", error);
        error
    }
}

/// Drives the publish pipeline against a pair of collaborators
pub struct Publisher<'a> {
    warehouse: &'a dyn Warehouse,
    platform: &'a dyn AnalyticsPlatform,
    warehouse_config: &'a WarehouseConfig,
    platform_config: &'a PlatformConfig,
}

impl<'a> Publisher<'a> {
    pub fn new(
        warehouse: &'a dyn Warehouse,
        platform: &'a dyn AnalyticsPlatform,
        warehouse_config: &'a WarehouseConfig,
        platform_config: &'a PlatformConfig,
    ) -> Self {
        Self {
            warehouse,
            platform,
            warehouse_config,
            platform_config,
        }
    }

    /// Publish a dataset and its model. The warehouse coordinates in
    /// [`WarehouseConfig`] take precedence over `config.database` and
    /// `config.schema` for the table documents.
    pub async fn publish(
        &self,
        dataset: &Dataset,
        config: &ModelConfig,
        strategy: &JoinStrategy,
        model_name: &str,
    ) -> Result<PublishReport, PublishError> {
        let mut report = PublishReport::default();

        for table in dataset.tables() {
            let clean_name = config.clean_table_name(&table.name);
            info!(
                "Inserting {} ({} rows) as {}",
                table.name,
                table.row_count(),
                clean_name
            );
            self.warehouse
                .insert_table(self.warehouse_config, &clean_name, table)
                .await
                .map_err(|e| {
                    PublishError::new(PublishStage::WarehouseInsert(clean_name.clone()), e, &report)
                })?;
            report.tables.push(clean_name);
        }

        // Table documents must point at where the rows were written
        let table_config = ModelConfig {
            database: self.warehouse_config.database.clone(),
            schema: self.warehouse_config.schema.clone(),
            ..config.clone()
        };
        info!("Importing documents into {}", self.platform_config.base_url);
        let builder = TableDocumentBuilder::new(&table_config);
        for (table, clean_name) in dataset.tables().iter().zip(report.tables.clone()) {
            let document = builder
                .export(table)
                .map_err(|e| PublishError::new(PublishStage::Serialization, e, &report))?;
            let id = self
                .platform
                .import_document(self.platform_config, &document.content)
                .await
                .map_err(|e| {
                    PublishError::new(PublishStage::TableImport(clean_name.clone()), e, &report)
                })?;
            info!("Imported table document for {} as {}", clean_name, id);
            report.table_guids.push(id);
        }

        let model = ModelAssembler::new(config).assemble(dataset, model_name, strategy);
        let document = ModelDocumentExporter::new()
            .export(&model)
            .map_err(|e| PublishError::new(PublishStage::Serialization, e, &report))?;
        let model_id = self
            .platform
            .import_document(self.platform_config, &document.content)
            .await
            .map_err(|e| PublishError::new(PublishStage::ModelImport, e, &report))?;
        info!("Imported model '{}' as {}", model_name, model_id);
        report.model_id = Some(model_id);

        Ok(report)
    }

    /// Build a dashboard over an imported model and import it, returning
    /// the platform id of the created liveboard
    pub async fn publish_liveboard(
        &self,
        builder: &LiveboardBuilder,
        questions: &[QuestionSpec],
        model_id: &str,
        model_name: &str,
        tokens: &dyn SearchTokenSource,
    ) -> Result<String, PublishError> {
        let report = PublishReport {
            model_id: Some(model_id.to_string()),
            ..Default::default()
        };
        let document = builder
            .build(questions, model_id, model_name, tokens)
            .await
            .and_then(|doc| doc.to_yaml())
            .map_err(|e: ExportError| PublishError::new(PublishStage::Serialization, e, &report))?;
        let id = self
            .platform
            .import_document(self.platform_config, &document.content)
            .await
            .map_err(|e| PublishError::new(PublishStage::LiveboardImport, e, &report))?;
        info!(
            "Imported liveboard with {} visualizations as {}",
            questions.len(),
            id
        );
        Ok(id)
    }
}
