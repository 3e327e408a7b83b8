//! Join edge model for the SDK

use serde::{Deserialize, Serialize};

/// Join type between two model tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JoinType {
    #[default]
    Inner,
}

/// Cardinality of a join as seen from its owning (`from`) table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Cardinality {
    /// Owning table is the dimension ("one") side
    OneToMany,
    /// Owning table is the fact ("many") side
    ManyToOne,
}

impl std::fmt::Display for Cardinality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cardinality::OneToMany => write!(f, "ONE_TO_MANY"),
            Cardinality::ManyToOne => write!(f, "MANY_TO_ONE"),
        }
    }
}

/// Directed join between two model tables on a shared column
///
/// Table names are cleaned, upper-cased model identifiers. The join column
/// carries the same name on both sides.
///
/// # Example
///
/// ```rust
/// use dataset_model_sdk::models::{Cardinality, JoinEdge};
///
/// let edge = JoinEdge::new("CUSTOMERS", "ORDERS", "customer_id", Cardinality::OneToMany);
/// assert_eq!(edge.predicate(), "[CUSTOMERS::CUSTOMER_ID] = [ORDERS::CUSTOMER_ID]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JoinEdge {
    pub from_table: String,
    pub to_table: String,
    pub join_column: String,
    #[serde(default)]
    pub join_type: JoinType,
    pub cardinality: Cardinality,
}

impl JoinEdge {
    pub fn new(from_table: &str, to_table: &str, join_column: &str, cardinality: Cardinality) -> Self {
        Self {
            from_table: from_table.to_uppercase(),
            to_table: to_table.to_uppercase(),
            join_column: join_column.to_uppercase(),
            join_type: JoinType::Inner,
            cardinality,
        }
    }

    /// Dedup key `(from, to, column)`
    pub fn key(&self) -> (String, String, String) {
        (
            self.from_table.clone(),
            self.to_table.clone(),
            self.join_column.clone(),
        )
    }

    /// Join predicate in the platform's bracketed column syntax
    pub fn predicate(&self) -> String {
        format!(
            "[{}::{}] = [{}::{}]",
            self.from_table, self.join_column, self.to_table, self.join_column
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinality_display_matches_serde() {
        let json = serde_json::to_string(&Cardinality::OneToMany).unwrap();
        assert_eq!(json, format!("\"{}\"", Cardinality::OneToMany));
    }

    #[test]
    fn test_edge_uppercases_identifiers() {
        let edge = JoinEdge::new("demo_customers", "demo_orders", "customer_id", Cardinality::OneToMany);
        assert_eq!(edge.from_table, "DEMO_CUSTOMERS");
        assert_eq!(edge.join_column, "CUSTOMER_ID");
        assert_eq!(edge.join_type, JoinType::Inner);
    }

    #[test]
    fn test_edge_deserialize_defaults_join_type() {
        let yaml = "from_table: A\nto_table: B\njoin_column: X_ID\ncardinality: ONE_TO_MANY\n";
        let edge: JoinEdge = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(edge.join_type, JoinType::Inner);
        assert_eq!(edge.cardinality, Cardinality::OneToMany);
    }
}
