//! Join validation functionality
//!
//! Checks an assembled model's join graph against the dataset it came from:
//! join columns must exist on both sides, edges must be unique and must not
//! loop back onto their own table. Tables left outside the join graph are
//! reported as warnings.

use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::{HashMap, HashSet};

use crate::models::{ColumnDescriptor, DataModel, Dataset, JoinEdge, TableKind};

/// Problem found on a single join edge
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum JoinIssue {
    #[error("Join {} references unknown table {table}", .edge.predicate())]
    UnknownTable { edge: JoinEdge, table: String },
    #[error("Join {} uses column {column} missing from {table}", .edge.predicate())]
    MissingColumn {
        edge: JoinEdge,
        table: String,
        column: String,
    },
    #[error("Duplicate join {}", .edge.predicate())]
    DuplicateEdge { edge: JoinEdge },
    #[error("Self join {}", .edge.predicate())]
    SelfJoin { edge: JoinEdge },
}

/// Result of join validation
#[derive(Debug, Default)]
pub struct JoinValidationResult {
    /// Hard problems: the document would reference columns or tables that
    /// do not exist
    pub issues: Vec<JoinIssue>,
    /// Tables no join touches (only reported when the model has more than
    /// one table)
    pub disconnected_tables: Vec<String>,
    /// Number of connected components in the undirected join graph
    pub component_count: usize,
}

impl JoinValidationResult {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Join graph validator
#[derive(Debug, Default)]
pub struct JoinValidator;

impl JoinValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, model: &DataModel, dataset: &Dataset) -> JoinValidationResult {
        let mut result = JoinValidationResult::default();
        let mut seen = HashSet::new();

        for edge in model.edges() {
            if !seen.insert(edge.key()) {
                result.issues.push(JoinIssue::DuplicateEdge { edge: edge.clone() });
                continue;
            }
            if edge.from_table == edge.to_table {
                result.issues.push(JoinIssue::SelfJoin { edge: edge.clone() });
                continue;
            }
            for table in [&edge.from_table, &edge.to_table] {
                match self.table_has_column(model, dataset, table, &edge.join_column) {
                    None => result.issues.push(JoinIssue::UnknownTable {
                        edge: edge.clone(),
                        table: table.clone(),
                    }),
                    Some(false) => result.issues.push(JoinIssue::MissingColumn {
                        edge: edge.clone(),
                        table: table.clone(),
                        column: edge.join_column.clone(),
                    }),
                    Some(true) => {}
                }
            }
        }

        let (graph, nodes) = join_graph(model);
        result.component_count = petgraph::algo::connected_components(&graph);
        if model.tables.len() > 1 {
            result.disconnected_tables = model
                .tables
                .iter()
                .filter(|t| {
                    nodes
                        .get(t.name.as_str())
                        .is_some_and(|idx| graph.neighbors(*idx).next().is_none())
                })
                .map(|t| t.name.clone())
                .collect();
        }
        result
    }

    /// `None` when the table is not part of the model or its source is
    /// missing from the dataset
    fn table_has_column(
        &self,
        model: &DataModel,
        dataset: &Dataset,
        table: &str,
        column: &str,
    ) -> Option<bool> {
        let table_ref = model.table(table)?;
        match table_ref.kind {
            TableKind::DateDimension => model
                .date_dimension
                .as_ref()
                .map(|dim| dim.has_column(column)),
            TableKind::Source => {
                let source = dataset.table(table_ref.source.as_deref()?)?;
                Some(source.has_column(column))
            }
        }
    }
}

fn join_graph(model: &DataModel) -> (UnGraph<&str, ()>, HashMap<&str, NodeIndex>) {
    let mut graph = UnGraph::new_undirected();
    let mut nodes = HashMap::new();
    for table in &model.tables {
        nodes
            .entry(table.name.as_str())
            .or_insert_with(|| graph.add_node(table.name.as_str()));
    }
    for edge in model.edges() {
        if edge.from_table == edge.to_table {
            continue;
        }
        if let (Some(&from), Some(&to)) = (
            nodes.get(edge.from_table.as_str()),
            nodes.get(edge.to_table.as_str()),
        ) {
            graph.add_edge(from, to, ());
        }
    }
    (graph, nodes)
}

/// Display labels used by more than one column, in first-seen order
pub fn check_display_names(columns: &[ColumnDescriptor]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for column in columns {
        if !seen.insert(column.display_name.as_str()) && !duplicates.contains(&column.display_name) {
            duplicates.push(column.display_name.clone());
        }
    }
    duplicates
}
