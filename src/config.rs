//! Pipeline configuration - every file location a run touches.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ChurnError, Result};

/// Raw input, relative to the project root
pub const DEFAULT_RAW_DATA: &str = "data/raw/telco_churn.csv";
pub const DEFAULT_CLEANED_DATA: &str = "data/cleaned/telco_churn_cleaned.csv";
pub const DEFAULT_ENGINEERED_DATA: &str = "data/cleaned/telco_churn_engineered.csv";
pub const DEFAULT_FIGURES_DIR: &str = "outputs/figures";
pub const DEFAULT_REPORTS_DIR: &str = "outputs/reports";
pub const DEFAULT_REPORT_FILE: &str = "churn_summary_report.txt";

/// Explicit file layout for one pipeline run.
///
/// Built once by the caller and handed to each stage; nothing in the
/// library reads paths from global state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub raw_data_path: PathBuf,
    pub cleaned_data_path: PathBuf,
    pub engineered_data_path: PathBuf,
    pub figures_dir: PathBuf,
    pub reports_dir: PathBuf,
    pub report_file_name: String,
    /// Field delimiter for CSV input and output
    pub separator: u8,
    /// Rows scanned for CSV type inference; `None` scans the whole file
    pub infer_schema_length: Option<usize>,
}

impl PipelineConfig {
    /// Reference layout rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            raw_data_path: root.join(DEFAULT_RAW_DATA),
            cleaned_data_path: root.join(DEFAULT_CLEANED_DATA),
            engineered_data_path: root.join(DEFAULT_ENGINEERED_DATA),
            figures_dir: root.join(DEFAULT_FIGURES_DIR),
            reports_dir: root.join(DEFAULT_REPORTS_DIR),
            report_file_name: DEFAULT_REPORT_FILE.to_string(),
            separator: b',',
            infer_schema_length: Some(10_000),
        }
    }

    pub fn with_raw_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.raw_data_path = path.into();
        self
    }

    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    /// 0 means full table scan, matching the CLI flag.
    pub fn with_infer_schema_length(mut self, rows: usize) -> Self {
        self.infer_schema_length = if rows == 0 { None } else { Some(rows) };
        self
    }

    pub fn report_path(&self) -> PathBuf {
        self.reports_dir.join(&self.report_file_name)
    }

    /// Create every directory an output is written into.
    pub fn ensure_output_dirs(&self) -> Result<()> {
        let mut dirs: Vec<&Path> = vec![&self.figures_dir, &self.reports_dir];
        for file in [&self.cleaned_data_path, &self.engineered_data_path] {
            if let Some(parent) = file.parent() {
                dirs.push(parent);
            }
        }

        for dir in dirs {
            if dir.as_os_str().is_empty() {
                continue;
            }
            std::fs::create_dir_all(dir)
                .map_err(|e| ChurnError::resource("create directory", dir, e))?;
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
