//! Dataset Model SDK - Infer analytic data models from tabular datasets
//!
//! Provides unified interfaces for:
//! - Dataset import (row-oriented JSON to typed tables)
//! - Model inference (column classification, display names, join inference)
//! - Export of model, table and liveboard documents
//! - Validation of join graphs and display names
//! - Publishing through warehouse and analytics-platform collaborators

pub mod cli;
pub mod config;
pub mod export;
pub mod import;
pub mod inference;
pub mod models;
pub mod publish;
pub mod validation;

// Re-export commonly used types
pub use config::{ConfigError, ModelConfig, ModelConfigBuilder, TieBreak};
pub use export::{
    ExportError, ExportResult, LiveboardBuilder, ModelDocumentExporter, QuestionSpec,
    SearchTokenSource, TableDocumentBuilder,
};
pub use import::{ImportError, RecordImporter};
pub use inference::{JoinStrategy, ModelAssembler, RelationshipInferrer};
pub use publish::{
    AnalyticsPlatform, IfExists, PlatformConfig, PublishError, PublishReport, PublishStage,
    Publisher, Warehouse, WarehouseConfig,
};
pub use validation::{JoinValidationResult, JoinValidator};

// Re-export models
pub use models::{
    Cardinality, ColumnData, ColumnDescriptor, ColumnValues, DataModel, Dataset, DatasetError,
    JoinEdge, SemanticRole, StorageKind, TableData,
};
