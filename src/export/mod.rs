//! Export functionality
//!
//! Serializes models into the import payloads the analytics platform expects:
//! - Model documents (tables, columns, joins, properties)
//! - Table documents (one per warehouse table)
//! - Liveboard documents (dashboards built from natural-language questions)
//!
//! Payloads are YAML with a fixed field order; identifiers are upper-cased.

pub mod liveboard;
pub mod model_document;
pub mod table_document;

use uuid::Uuid;

/// Result of an export operation
#[derive(Debug, Clone)]
pub struct ExportResult {
    /// Exported content
    pub content: String,
    /// Format identifier
    pub format: String,
    /// Document guid embedded in the content
    pub guid: Uuid,
}

/// Error during export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Search token error: {0}")]
    SearchError(String),
    #[error("Export error: {0}")]
    ExportError(String),
}

impl From<serde_yaml::Error> for ExportError {
    fn from(err: serde_yaml::Error) -> Self {
        ExportError::SerializationError(err.to_string())
    }
}

pub(crate) fn to_yaml<T: serde::Serialize>(
    document: &T,
    format: &str,
    guid: Uuid,
) -> Result<ExportResult, ExportError> {
    Ok(ExportResult {
        content: serde_yaml::to_string(document)?,
        format: format.to_string(),
        guid,
    })
}

// Re-export for convenience
pub use liveboard::{LiveboardBuilder, LiveboardDocument, QuestionSpec, SearchTokenSource};
pub use model_document::{ModelDocument, ModelDocumentExporter};
pub use table_document::{TableDocument, TableDocumentBuilder};
