//! Configuration for model inference
//!
//! Every naming convention the engine relies on (identifier suffix, source
//! table suffix, day-offset keys, warehouse placement) lives here so the
//! inference code never hard-codes them.

use crate::models::ModelProperties;
use serde::{Deserialize, Serialize};

/// Errors raised while loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

/// Policy for choosing the dimension side when row counts tie
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// First table in dataset order wins
    #[default]
    DatasetOrder,
    /// Lexicographically smallest cleaned table name wins
    TableName,
}

impl std::str::FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dataset_order" | "dataset-order" | "order" => Ok(TieBreak::DatasetOrder),
            "table_name" | "table-name" | "name" => Ok(TieBreak::TableName),
            _ => Err(format!(
                "Invalid tie break: {}. Expected: dataset_order, table_name",
                s
            )),
        }
    }
}

/// Configuration for model inference and document generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Prefix prepended to every cleaned table identifier (usually the
    /// warehouse database name). Empty means no prefix.
    pub table_prefix: String,
    /// Suffix stripped from dataset table names (e.g. `orders_df`)
    pub source_suffix: String,
    /// Suffix marking identifier columns, matched case-insensitively
    pub id_suffix: String,
    /// Column names recognised as day-offset keys
    pub date_offset_columns: Vec<String>,
    /// Name of the synthetic date dimension table
    pub date_dimension_table: String,
    /// Calendar date column exposed by the date dimension
    pub calendar_date_column: String,
    pub tie_break: TieBreak,
    /// Warehouse database referenced by table documents
    pub database: String,
    /// Warehouse schema referenced by table documents
    pub schema: String,
    /// Platform connection referenced by table documents
    pub connection: String,
    pub properties: ModelProperties,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            table_prefix: String::new(),
            source_suffix: "_df".to_string(),
            id_suffix: "_ID".to_string(),
            date_offset_columns: vec!["DAY_OFFSET".to_string()],
            date_dimension_table: "DATE_DIM".to_string(),
            calendar_date_column: "CALENDAR_DATE".to_string(),
            tie_break: TieBreak::DatasetOrder,
            database: "AUTO_CREATE".to_string(),
            schema: "PUBLIC".to_string(),
            connection: "AutoCreateConnection".to_string(),
            properties: ModelProperties::default(),
        }
    }
}

impl ModelConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> ModelConfigBuilder {
        ModelConfigBuilder::default()
    }

    /// Parse a TOML document; missing keys fall back to defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ModelConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.id_suffix.trim().is_empty() {
            return Err(ConfigError::Invalid("id_suffix cannot be empty".to_string()));
        }
        if self.date_dimension_table.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "date_dimension_table cannot be empty".to_string(),
            ));
        }
        if self.calendar_date_column.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "calendar_date_column cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Cleaned, upper-cased table identifier: `PREFIX_NAME` with the source
    /// suffix removed. Warehouse tables are created under the same name.
    pub fn clean_table_name(&self, source_name: &str) -> String {
        let base = strip_suffix_ignore_case(source_name, &self.source_suffix);
        if self.table_prefix.is_empty() {
            base.to_uppercase()
        } else {
            format!("{}_{}", self.table_prefix, base).to_uppercase()
        }
    }

    /// Identifier columns end with the configured suffix
    pub fn is_identifier_column(&self, column: &str) -> bool {
        let column = column.to_uppercase();
        let suffix = self.id_suffix.to_uppercase();
        column.len() > suffix.len() && column.ends_with(&suffix)
    }

    pub fn is_date_offset_column(&self, column: &str) -> bool {
        self.date_offset_columns
            .iter()
            .any(|c| c.eq_ignore_ascii_case(column))
    }

    /// Upper-cased date dimension identifier
    pub fn date_dimension_name(&self) -> String {
        self.date_dimension_table.to_uppercase()
    }
}

fn strip_suffix_ignore_case<'a>(name: &'a str, suffix: &str) -> &'a str {
    if suffix.is_empty() || name.len() <= suffix.len() {
        return name;
    }
    let split = name.len() - suffix.len();
    match (name.get(..split), name.get(split..)) {
        (Some(head), Some(tail)) if tail.eq_ignore_ascii_case(suffix) => head,
        _ => name,
    }
}

/// Builder for ModelConfig
#[derive(Debug, Default)]
pub struct ModelConfigBuilder {
    config: ModelConfig,
}

impl ModelConfigBuilder {
    pub fn table_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.table_prefix = prefix.into();
        self
    }

    pub fn source_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.source_suffix = suffix.into();
        self
    }

    pub fn id_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.id_suffix = suffix.into();
        self
    }

    pub fn date_offset_columns(mut self, columns: Vec<String>) -> Self {
        self.config.date_offset_columns = columns;
        self
    }

    pub fn date_dimension_table(mut self, table: impl Into<String>) -> Self {
        self.config.date_dimension_table = table.into();
        self
    }

    pub fn calendar_date_column(mut self, column: impl Into<String>) -> Self {
        self.config.calendar_date_column = column.into();
        self
    }

    pub fn tie_break(mut self, tie_break: TieBreak) -> Self {
        self.config.tie_break = tie_break;
        self
    }

    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.config.database = database.into();
        self
    }

    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.config.schema = schema.into();
        self
    }

    pub fn connection(mut self, connection: impl Into<String>) -> Self {
        self.config.connection = connection.into();
        self
    }

    pub fn properties(mut self, properties: ModelProperties) -> Self {
        self.config.properties = properties;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ModelConfig {
        self.config
    }
}
