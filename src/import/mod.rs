//! Import functionality
//!
//! Builds [`Dataset`](crate::models::Dataset)s from the row-oriented JSON the
//! code-execution collaborator produces.

pub mod records;

use crate::models::DatasetError;

/// Error during import
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Invalid structure: {0}")]
    InvalidStructure(String),
    #[error("Row {index} of table '{table}' is not an object")]
    InvalidRow { table: String, index: usize },
    #[error("Invalid dataset: {0}")]
    Dataset(#[from] DatasetError),
}

impl From<serde_json::Error> for ImportError {
    fn from(e: serde_json::Error) -> Self {
        ImportError::ParseError(e.to_string())
    }
}

// Re-export for convenience
pub use records::{RecordImporter, parse_date};
