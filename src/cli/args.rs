//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::PipelineConfig;

/// churnlens - Clean, engineer and report on the Telco customer churn export
#[derive(Parser, Debug)]
#[command(name = "churnlens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Project root that holds data/ and outputs/
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Raw input file (CSV or Parquet).
    /// Defaults to data/raw/telco_churn.csv under the project root.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Field delimiter for CSV input and output
    #[arg(long, default_value = ",", value_parser = parse_separator)]
    pub separator: u8,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Log level when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Suppress banners, spinners and the run summary
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,

    /// Skip chart data export during `run`
    #[arg(long, default_value = "false")]
    pub no_charts: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Run every stage: clean, features, charts and report (default)
    Run,
    /// Repair, deduplicate and save the cleaned table
    Clean,
    /// Engineer model features from the saved cleaned table
    Features,
    /// Write the text summary report from the saved cleaned table
    Report,
    /// Export chart data from the saved cleaned table
    Charts,
}

impl Cli {
    /// Subcommand to execute; `run` when none was given.
    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Run)
    }

    /// Pipeline configuration described by the flags.
    pub fn config(&self) -> PipelineConfig {
        let mut config = PipelineConfig::new(&self.root)
            .with_separator(self.separator)
            .with_infer_schema_length(self.infer_schema_length);
        if let Some(input) = &self.input {
            config = config.with_raw_data_path(input);
        }
        config
    }
}

/// Accept a single ASCII character, or `\t` / `tab`.
fn parse_separator(s: &str) -> Result<u8, String> {
    match s {
        "\\t" | "tab" => return Ok(b'\t'),
        _ => {}
    }
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c as u8),
        _ => Err(format!(
            "separator must be a single ASCII character, got '{}'",
            s
        )),
    }
}
