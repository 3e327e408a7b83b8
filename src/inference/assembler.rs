//! Model assembly
//!
//! Composes column classification, display-name resolution and relationship
//! inference into one [`DataModel`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::classifier::classify;
use super::naming::DisplayNameResolver;
use super::relationships::{RelationshipInferrer, dedup_edges};
use crate::config::ModelConfig;
use crate::models::{
    ColumnDescriptor, ColumnId, DataModel, Dataset, DateDimension, JoinEdge, StorageKind,
    TableKind, TableRef,
};

/// How caller-supplied joins interact with inferred ones
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "joins", rename_all = "snake_case")]
pub enum JoinStrategy {
    /// Shared-identifier ranking plus implicit date-dimension joins
    #[default]
    Inferred,
    /// The model's joins are exactly these edges (after dedup)
    Replace(Vec<JoinEdge>),
    /// These edges stand in for the ranking-based joins; implicit
    /// date-dimension joins are still added
    MergeWithDateDimension(Vec<JoinEdge>),
}

/// Assembles a data model from a dataset
///
/// # Example
///
/// ```rust
/// use dataset_model_sdk::config::ModelConfig;
/// use dataset_model_sdk::inference::{JoinStrategy, ModelAssembler};
/// use dataset_model_sdk::models::Dataset;
///
/// let config = ModelConfig::default();
/// let model = ModelAssembler::new(&config).assemble(&Dataset::default(), "Empty", &JoinStrategy::Inferred);
/// assert!(model.tables.is_empty());
/// assert!(model.columns.is_empty());
/// ```
pub struct ModelAssembler<'a> {
    config: &'a ModelConfig,
}

impl<'a> ModelAssembler<'a> {
    pub fn new(config: &'a ModelConfig) -> Self {
        Self { config }
    }

    pub fn assemble(&self, dataset: &Dataset, model_name: &str, strategy: &JoinStrategy) -> DataModel {
        let mut resolver = DisplayNameResolver::new();
        let mut tables = Vec::with_capacity(dataset.len());
        let mut columns = Vec::new();

        for table in dataset.tables() {
            let clean = self.config.clean_table_name(&table.name);
            for column in table.columns() {
                let display_name = resolver.resolve(&clean, &column.name);
                columns.push(ColumnDescriptor::new(
                    ColumnId::new(&clean, &column.name),
                    display_name,
                    classify(column.kind()),
                ));
            }
            tables.push(TableRef::source(clean, &table.name));
        }

        let edges = self.resolve_joins(dataset, strategy);

        let date_dimension = self.date_dimension(&edges);
        if let Some(ref dim) = date_dimension {
            debug!(
                "Attaching date dimension {} on {:?}",
                dim.table, dim.key_columns
            );
            let display_name = resolver.resolve(&dim.table, &dim.calendar_column);
            columns.push(ColumnDescriptor::new(
                ColumnId::new(&dim.table, &dim.calendar_column),
                display_name,
                classify(StorageKind::Date),
            ));
            tables.push(TableRef {
                name: dim.table.clone(),
                source: None,
                kind: TableKind::DateDimension,
            });
        }

        let mut joins: BTreeMap<String, Vec<JoinEdge>> = BTreeMap::new();
        for edge in edges {
            joins.entry(edge.from_table.clone()).or_default().push(edge);
        }

        debug!(
            "Assembled model '{}': {} tables, {} columns, {} join owners",
            model_name,
            tables.len(),
            columns.len(),
            joins.len()
        );

        DataModel {
            name: model_name.to_string(),
            tables,
            columns,
            joins,
            date_dimension,
            properties: self.config.properties,
        }
    }

    fn resolve_joins(&self, dataset: &Dataset, strategy: &JoinStrategy) -> Vec<JoinEdge> {
        let inferrer = RelationshipInferrer::new(self.config);
        match strategy {
            JoinStrategy::Inferred => inferrer.infer(dataset),
            JoinStrategy::Replace(overrides) => dedup_edges(normalize(overrides)),
            JoinStrategy::MergeWithDateDimension(overrides) => {
                let mut edges = normalize(overrides);
                edges.extend(inferrer.infer_date_dimension_joins(dataset));
                dedup_edges(edges)
            }
        }
    }

    /// The date dimension is attached when any edge touches it. Its key
    /// columns are the configured day-offset columns, whatever the edges say.
    fn date_dimension(&self, edges: &[JoinEdge]) -> Option<DateDimension> {
        let table = self.config.date_dimension_name();
        if !edges
            .iter()
            .any(|e| e.to_table == table || e.from_table == table)
        {
            return None;
        }
        let mut key_columns: Vec<String> = Vec::new();
        for column in &self.config.date_offset_columns {
            let column = column.to_uppercase();
            if !key_columns.contains(&column) {
                key_columns.push(column);
            }
        }
        Some(DateDimension {
            table,
            key_columns,
            calendar_column: self.config.calendar_date_column.to_uppercase(),
        })
    }
}

/// Upper-case caller-supplied identifiers so they match generated ones
fn normalize(edges: &[JoinEdge]) -> Vec<JoinEdge> {
    edges
        .iter()
        .map(|e| JoinEdge {
            join_type: e.join_type,
            ..JoinEdge::new(&e.from_table, &e.to_table, &e.join_column, e.cardinality)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Cardinality, ColumnData, ColumnValues, SemanticRole, TableData};

    fn dataset() -> Dataset {
        let customers = TableData::new(
            "customers_df",
            vec![
                ColumnData::new("CUSTOMER_ID", ColumnValues::Int64(vec![Some(1), Some(2)])),
                ColumnData::new(
                    "NAME",
                    ColumnValues::Text(vec![Some("a".into()), Some("b".into())]),
                ),
            ],
        )
        .unwrap();
        let orders = TableData::new(
            "orders_df",
            vec![
                ColumnData::new("CUSTOMER_ID", ColumnValues::Int64(vec![Some(1); 4])),
                ColumnData::new("DAY_OFFSET", ColumnValues::Int64(vec![Some(0); 4])),
            ],
        )
        .unwrap();
        Dataset::new(vec![customers, orders]).unwrap()
    }

    #[test]
    fn test_assemble_inferred() {
        let config = ModelConfig::builder().table_prefix("demo").build();
        let model = ModelAssembler::new(&config).assemble(&dataset(), "Demo Model", &JoinStrategy::Inferred);

        let names: Vec<&str> = model.tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["DEMO_CUSTOMERS", "DEMO_ORDERS", "DATE_DIM"]);

        assert_eq!(model.joins_for("DEMO_CUSTOMERS").len(), 1);
        assert_eq!(model.joins_for("DEMO_ORDERS")[0].to_table, "DATE_DIM");

        let dim = model.date_dimension.as_ref().unwrap();
        assert_eq!(dim.key_columns, vec!["DAY_OFFSET"]);

        let calendar = model.columns.last().unwrap();
        assert_eq!(calendar.id.to_string(), "DATE_DIM::CALENDAR_DATE");
        assert_eq!(calendar.display_name, "Calendar Date");
        assert_eq!(calendar.role, SemanticRole::Attribute);
    }

    #[test]
    fn test_display_names_follow_dataset_order() {
        let config = ModelConfig::builder().table_prefix("demo").build();
        let model = ModelAssembler::new(&config).assemble(&dataset(), "m", &JoinStrategy::Inferred);
        let labels: Vec<&str> = model.columns.iter().map(|c| c.display_name.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Customer Id",
                "Name",
                "Demo Orders Customer Id",
                "Day Offset",
                "Calendar Date"
            ]
        );
    }

    #[test]
    fn test_replace_strategy_is_exact() {
        let config = ModelConfig::default();
        let override_edge = JoinEdge::new("orders", "customers", "customer_id", Cardinality::ManyToOne);
        let model = ModelAssembler::new(&config).assemble(
            &dataset(),
            "m",
            &JoinStrategy::Replace(vec![override_edge.clone(), override_edge.clone()]),
        );
        let edges: Vec<&JoinEdge> = model.edges().collect();
        assert_eq!(edges, vec![&override_edge]);
        assert!(model.date_dimension.is_none());
        assert!(model.table("DATE_DIM").is_none());
    }

    #[test]
    fn test_merge_strategy_keeps_date_joins() {
        let config = ModelConfig::default();
        let override_edge = JoinEdge::new("ORDERS", "CUSTOMERS", "CUSTOMER_ID", Cardinality::ManyToOne);
        let model = ModelAssembler::new(&config).assemble(
            &dataset(),
            "m",
            &JoinStrategy::MergeWithDateDimension(vec![override_edge]),
        );
        let edges: Vec<&JoinEdge> = model.edges().collect();
        assert_eq!(edges.len(), 2);
        assert!(model.joins_for("CUSTOMERS").is_empty());
        assert_eq!(model.joins_for("ORDERS").len(), 2);
        assert!(model.date_dimension.is_some());
    }

    #[test]
    fn test_properties_come_from_config() {
        let config = ModelConfig::default();
        let model = ModelAssembler::new(&config).assemble(&Dataset::default(), "m", &JoinStrategy::Inferred);
        assert!(!model.properties.bypass_rls);
        assert!(model.properties.join_progressive);
        assert!(model.properties.semantic_search);
    }
}
