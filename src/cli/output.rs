//! Output formatting for CLI

use crate::models::DataModel;
use crate::validation::JoinValidationResult;

/// Format an assembled model in compact mode
pub fn format_model_summary(model: &DataModel) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n✅ Model '{}': {} table(s), {} column(s)\n",
        model.name,
        model.tables.len(),
        model.columns.len()
    ));
    for table in &model.tables {
        let joins: Vec<String> = model
            .joins_for(&table.name)
            .iter()
            .map(|j| format!("{} ({})", j.to_table, j.join_column))
            .collect();
        if joins.is_empty() {
            output.push_str(&format!("  {}\n", table.name));
        } else {
            output.push_str(&format!("  {} -> {}\n", table.name, joins.join(", ")));
        }
    }

    output
}

/// Format validation findings; empty when there is nothing to report
pub fn format_validation_warnings(result: &JoinValidationResult, duplicate_names: &[String]) -> String {
    let mut output = String::new();

    if !result.issues.is_empty() {
        output.push_str("\n⚠️  Join Issues:\n");
        for issue in &result.issues {
            output.push_str(&format!("  - {}\n", issue));
        }
    }

    if !result.disconnected_tables.is_empty() {
        output.push_str("\n⚠️  Tables Without Joins:\n");
        for table in &result.disconnected_tables {
            output.push_str(&format!("  - {}\n", table));
        }
    }

    if !duplicate_names.is_empty() {
        output.push_str("\n⚠️  Duplicate Display Names:\n");
        for name in duplicate_names {
            output.push_str(&format!("  - {}\n", name));
        }
    }

    output
}
