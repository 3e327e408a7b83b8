//! Model inference engine
//!
//! Turns a [`Dataset`](crate::models::Dataset) into a
//! [`DataModel`](crate::models::DataModel).
//!
//! ## Stages
//!
//! - **Type classification** - storage kind to type tag, role and aggregation
//! - **Display names** - unique human-readable labels across all tables
//! - **Relationships** - one-to-many joins from shared identifier columns,
//!   plus implicit date-dimension joins
//! - **Assembly** - everything above plus caller-supplied join overrides
//!
//! All stages are pure functions of their inputs.
//!
//! ## Example
//!
//! ```rust
//! use dataset_model_sdk::config::ModelConfig;
//! use dataset_model_sdk::inference::{JoinStrategy, ModelAssembler};
//! use dataset_model_sdk::models::{ColumnData, ColumnValues, Dataset, TableData};
//!
//! let customers = TableData::new(
//!     "customers",
//!     vec![ColumnData::new("CUSTOMER_ID", ColumnValues::Int64(vec![Some(1)]))],
//! ).unwrap();
//! let orders = TableData::new(
//!     "orders",
//!     vec![ColumnData::new("CUSTOMER_ID", ColumnValues::Int64(vec![Some(1), Some(1)]))],
//! ).unwrap();
//! let dataset = Dataset::new(vec![customers, orders]).unwrap();
//!
//! let config = ModelConfig::default();
//! let model = ModelAssembler::new(&config).assemble(&dataset, "Sales", &JoinStrategy::Inferred);
//! assert_eq!(model.joins_for("CUSTOMERS")[0].to_table, "ORDERS");
//! ```

mod assembler;
mod classifier;
mod naming;
mod relationships;

pub use assembler::{JoinStrategy, ModelAssembler};
pub use classifier::classify;
pub use naming::{DisplayNameResolver, normalize_column_name, resolve_display_names, title_case};
pub use relationships::{RelationshipInferrer, dedup_edges};
