//! Liveboard (dashboard) document builder
//!
//! Each natural-language question becomes one visualization. The search
//! query for a question is obtained from the analytics platform through a
//! [`SearchTokenSource`], so building is async.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::{ExportError, ExportResult, to_yaml};

/// Chart type used when a question spec does not name one
pub const DEFAULT_CHART_TYPE: &str = "COLUMN";

/// Converts a natural-language question into the platform's search tokens
#[async_trait(?Send)]
pub trait SearchTokenSource {
    async fn search_tokens(&self, question: &str, model_id: &str) -> anyhow::Result<String>;
}

fn default_chart_type() -> String {
    DEFAULT_CHART_TYPE.to_string()
}

/// One requested visualization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSpec {
    pub question: String,
    #[serde(default = "default_chart_type")]
    pub chart_type: String,
}

impl QuestionSpec {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            chart_type: default_chart_type(),
        }
    }

    pub fn with_chart_type(mut self, chart_type: impl Into<String>) -> Self {
        self.chart_type = chart_type.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerTable {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    #[serde(rename = "type")]
    pub chart_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub name: String,
    pub tables: Vec<AnswerTable>,
    pub search_query: String,
    pub chart: Chart,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visualization {
    pub id: String,
    pub answer: Answer,
    pub viz_guid: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveboardBody {
    pub name: String,
    pub visualizations: Vec<Visualization>,
}

/// Top-level dashboard import payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveboardDocument {
    pub guid: String,
    pub liveboard: LiveboardBody,
}

impl LiveboardDocument {
    pub fn to_yaml(&self) -> Result<ExportResult, ExportError> {
        let guid = Uuid::parse_str(&self.guid)
            .map_err(|e| ExportError::ExportError(format!("Invalid guid: {}", e)))?;
        to_yaml(self, "liveboard", guid)
    }
}

/// Sentence-case a question: first character upper, the rest lower
fn answer_name(question: &str) -> String {
    let trimmed = question.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Builder for dashboards over a published model
#[derive(Debug, Clone)]
pub struct LiveboardBuilder {
    name: String,
}

impl Default for LiveboardBuilder {
    fn default() -> Self {
        Self::new("Generated Dashboard")
    }
}

impl LiveboardBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Build a dashboard with one visualization per question, in order.
    ///
    /// `model_id` is passed to the token source; `model_name` is the table
    /// every answer reads from.
    pub async fn build(
        &self,
        questions: &[QuestionSpec],
        model_id: &str,
        model_name: &str,
        source: &dyn SearchTokenSource,
    ) -> Result<LiveboardDocument, ExportError> {
        let mut visualizations = Vec::with_capacity(questions.len());
        for (index, spec) in questions.iter().enumerate() {
            let search_query = source
                .search_tokens(&spec.question, model_id)
                .await
                .map_err(|e| {
                    ExportError::SearchError(format!("question '{}': {:#}", spec.question, e))
                })?;
            debug!("Question '{}' resolved to '{}'", spec.question, search_query);

            visualizations.push(Visualization {
                id: format!("Viz_{}", index + 1),
                answer: Answer {
                    name: answer_name(&spec.question),
                    tables: vec![AnswerTable {
                        id: model_name.to_string(),
                        name: model_name.to_string(),
                    }],
                    search_query,
                    chart: Chart {
                        chart_type: spec.chart_type.clone(),
                    },
                },
                viz_guid: Uuid::new_v4().to_string(),
            });
        }

        Ok(LiveboardDocument {
            guid: Uuid::new_v4().to_string(),
            liveboard: LiveboardBody {
                name: self.name.clone(),
                visualizations,
            },
        })
    }
}
