//! Infer command implementation

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::cli::error::CliError;
use crate::cli::output::{format_model_summary, format_validation_warnings};
use crate::config::ModelConfig;
use crate::export::{ModelDocumentExporter, TableDocumentBuilder};
use crate::import::RecordImporter;
use crate::inference::{JoinStrategy, ModelAssembler};
use crate::models::JoinEdge;
use crate::validation::{JoinValidator, check_display_names};

/// How `--overrides` joins combine with inferred ones
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OverrideMode {
    /// Overrides are the model's complete join set
    #[default]
    Replace,
    /// Overrides plus implicit date-dimension joins
    Merge,
}

/// Arguments for the `infer` command
#[derive(Debug, Clone)]
pub struct InferArgs {
    /// JSON dataset (`-` for stdin)
    pub input: String,
    /// TOML model configuration
    pub config: Option<PathBuf>,
    pub model_name: String,
    /// YAML list of join edges
    pub overrides: Option<PathBuf>,
    pub override_mode: OverrideMode,
    /// Directory receiving one table document per table
    pub tables_dir: Option<PathBuf>,
    /// Model document path (stdout if not provided)
    pub output: Option<PathBuf>,
}

/// Load input content from file or stdin
fn load_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| CliError::InvalidArgument(format!("Failed to read stdin: {}", e)))?;
        Ok(content)
    } else {
        read_file(Path::new(input))
    }
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|e| CliError::FileReadError(path.to_path_buf(), e.to_string()))
}

fn write_file(path: &Path, content: &str) -> Result<(), CliError> {
    std::fs::write(path, content).map_err(|e| CliError::FileWriteError(path.to_path_buf(), e.to_string()))
}

fn load_strategy(args: &InferArgs) -> Result<JoinStrategy, CliError> {
    let Some(path) = &args.overrides else {
        return Ok(JoinStrategy::Inferred);
    };
    let edges: Vec<JoinEdge> = serde_yaml::from_str(&read_file(path)?).map_err(|e| {
        CliError::InvalidArgument(format!("Invalid overrides in {}: {}", path.display(), e))
    })?;
    Ok(match args.override_mode {
        OverrideMode::Replace => JoinStrategy::Replace(edges),
        OverrideMode::Merge => JoinStrategy::MergeWithDateDimension(edges),
    })
}

/// Handle the `infer` command
pub fn handle_infer(args: &InferArgs) -> Result<(), CliError> {
    let config = match &args.config {
        Some(path) => ModelConfig::from_toml_str(&read_file(path)?)?,
        None => ModelConfig::default(),
    };
    let strategy = load_strategy(args)?;

    let dataset = RecordImporter::new().import_dataset_str(&load_input(&args.input)?)?;
    eprintln!("Loaded {} table(s)", dataset.len());

    let model = ModelAssembler::new(&config).assemble(&dataset, &args.model_name, &strategy);
    eprint!("{}", format_model_summary(&model));

    let validation = JoinValidator::new().validate(&model, &dataset);
    let duplicates = check_display_names(&model.columns);
    eprint!("{}", format_validation_warnings(&validation, &duplicates));

    if let Some(dir) = &args.tables_dir {
        std::fs::create_dir_all(dir)
            .map_err(|e| CliError::FileWriteError(dir.clone(), e.to_string()))?;
        let builder = TableDocumentBuilder::new(&config);
        for table in dataset.tables() {
            let document = builder.export(table)?;
            let path = dir.join(format!(
                "{}.table.yaml",
                config.clean_table_name(&table.name)
            ));
            write_file(&path, &document.content)?;
            eprintln!("Wrote {}", path.display());
        }
    }

    let document = ModelDocumentExporter::new().export(&model)?;
    match &args.output {
        Some(path) => {
            write_file(path, &document.content)?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{}", document.content),
    }

    Ok(())
}
