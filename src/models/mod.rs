//! Models module for the SDK
//!
//! Defines the value types flowing through inference: source datasets,
//! column descriptors, join edges and the assembled data model.

pub mod column;
pub mod dataset;
pub mod model;
pub mod relationship;

pub use column::{Aggregation, Classification, ColumnDescriptor, ColumnId, DataType, SemanticRole};
pub use dataset::{ColumnData, ColumnValues, Dataset, DatasetError, StorageKind, TableData};
pub use model::{DataModel, DateDimension, ModelProperties, TableKind, TableRef};
pub use relationship::{Cardinality, JoinEdge, JoinType};
