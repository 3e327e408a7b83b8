//! Relationship inference from shared identifier columns
//!
//! Tables sharing an identifier column (by naming convention) are linked
//! one-to-many: the table with the fewest rows is taken as the dimension side
//! and every other table in the group as a fact side. Tables carrying a
//! day-offset key are additionally joined to a synthetic date dimension.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::config::{ModelConfig, TieBreak};
use crate::models::{Cardinality, Dataset, JoinEdge};

/// A table taking part in an identifier group
#[derive(Debug, Clone)]
struct GroupMember {
    /// Position in the dataset (iteration order)
    position: usize,
    table: String,
    rows: usize,
}

/// Relationship inferencer parameterised by naming conventions
pub struct RelationshipInferrer<'a> {
    config: &'a ModelConfig,
}

impl<'a> RelationshipInferrer<'a> {
    pub fn new(config: &'a ModelConfig) -> Self {
        Self { config }
    }

    /// Infer all edges: shared-identifier joins followed by date-dimension
    /// joins, deduplicated on `(from, to, column)`.
    pub fn infer(&self, dataset: &Dataset) -> Vec<JoinEdge> {
        let mut edges = self.infer_identifier_joins(dataset);
        edges.extend(self.infer_date_dimension_joins(dataset));
        dedup_edges(edges)
    }

    /// Group identifier columns across tables in first-seen order.
    fn identifier_groups(&self, dataset: &Dataset) -> Vec<(String, Vec<GroupMember>)> {
        let mut groups: Vec<(String, Vec<GroupMember>)> = Vec::new();

        for (position, table) in dataset.tables().iter().enumerate() {
            let clean = self.config.clean_table_name(&table.name);
            for column in table.columns() {
                if !self.config.is_identifier_column(&column.name) {
                    continue;
                }
                let id_col = column.name.to_uppercase();
                let member = GroupMember {
                    position,
                    table: clean.clone(),
                    rows: table.row_count(),
                };
                match groups.iter_mut().find(|(name, _)| *name == id_col) {
                    Some((_, members)) => members.push(member),
                    None => groups.push((id_col, vec![member])),
                }
            }
        }

        groups
    }

    /// Rank a group's members; the first one is the dimension side.
    fn rank(&self, members: &mut [GroupMember]) {
        match self.config.tie_break {
            TieBreak::DatasetOrder => {
                members.sort_by_key(|m| (m.rows, m.position));
            }
            TieBreak::TableName => {
                members.sort_by(|a, b| a.rows.cmp(&b.rows).then_with(|| a.table.cmp(&b.table)));
            }
        }
    }

    /// One-to-many edges from the smallest table of each shared identifier
    /// group to every other table in that group.
    pub fn infer_identifier_joins(&self, dataset: &Dataset) -> Vec<JoinEdge> {
        let mut edges = Vec::new();
        let mut defined = HashSet::new();

        for (id_col, mut members) in self.identifier_groups(dataset) {
            if members.len() < 2 {
                continue;
            }
            self.rank(&mut members);

            let dimension = &members[0];
            debug!(
                "Identifier {} shared by {} tables, dimension side {} ({} rows)",
                id_col,
                members.len(),
                dimension.table,
                dimension.rows
            );

            for fact in &members[1..] {
                if fact.table == dimension.table {
                    warn!(
                        "Skipping self join on {} for {}: source tables share a cleaned name",
                        id_col, fact.table
                    );
                    continue;
                }
                let edge = JoinEdge::new(
                    &dimension.table,
                    &fact.table,
                    &id_col,
                    Cardinality::OneToMany,
                );
                if defined.insert(edge.key()) {
                    edges.push(edge);
                }
            }
        }

        edges
    }

    /// Many-to-one edges from every table holding a day-offset key to the
    /// synthetic date dimension.
    pub fn infer_date_dimension_joins(&self, dataset: &Dataset) -> Vec<JoinEdge> {
        let date_dim = self.config.date_dimension_name();
        let mut edges = Vec::new();
        let mut defined = HashSet::new();

        for table in dataset.tables() {
            let clean = self.config.clean_table_name(&table.name);
            if clean == date_dim {
                warn!("Table {} collides with the date dimension name", clean);
                continue;
            }
            for column in table.columns() {
                if !self.config.is_date_offset_column(&column.name) {
                    continue;
                }
                let edge = JoinEdge::new(&clean, &date_dim, &column.name, Cardinality::ManyToOne);
                if defined.insert(edge.key()) {
                    debug!("Date dimension join {} on {}", clean, edge.join_column);
                    edges.push(edge);
                }
            }
        }

        edges
    }
}

/// Drop repeated `(from, to, column)` triples, keeping the first occurrence
pub fn dedup_edges(edges: Vec<JoinEdge>) -> Vec<JoinEdge> {
    let mut seen = HashSet::new();
    edges
        .into_iter()
        .filter(|e| seen.insert(e.key()))
        .collect()
}
