//! dataset-model CLI - infer analytic model documents from JSON datasets
//!
//! Usage:
//!   dataset-model infer --input <dataset.json> [--config model.toml] [--model-name NAME]
//!                       [--overrides joins.yaml --override-mode replace|merge]
//!                       [--tables-dir DIR] [--output FILE]

use clap::{Parser, Subcommand};
use dataset_model_sdk::cli::commands::{InferArgs, OverrideMode, handle_infer};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dataset-model")]
#[command(about = "Infer analytic data models (tables, columns, joins) from tabular datasets")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Infer a model document from a JSON dataset
    Infer {
        /// JSON object of table name to row array (`-` for stdin)
        #[arg(short, long)]
        input: String,

        /// TOML model configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Name of the generated model
        #[arg(short, long, default_value = "Generated Model")]
        model_name: String,

        /// YAML list of join edges used instead of inferred joins
        #[arg(long)]
        overrides: Option<PathBuf>,

        /// Whether overrides replace all joins or merge with date-dimension joins
        #[arg(long, value_enum, default_value = "replace")]
        override_mode: OverrideMode,

        /// Write one table document per table into this directory
        #[arg(long)]
        tables_dir: Option<PathBuf>,

        /// Model document output path (stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Infer {
            input,
            config,
            model_name,
            overrides,
            override_mode,
            tables_dir,
            output,
        } => handle_infer(&InferArgs {
            input,
            config,
            model_name,
            overrides,
            override_mode,
            tables_dir,
            output,
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
