//! Dataset loader for CSV and Parquet files

use std::path::Path;

use polars::prelude::*;
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::{ChurnError, Result};

/// Load a dataset from a file (CSV or Parquet based on extension).
///
/// Column order and the reader's inferred types are kept as-is; repairing
/// them is the cleaning stage's job.
pub fn load_dataset(
    path: &Path,
    separator: u8,
    infer_schema_length: Option<usize>,
) -> Result<DataFrame> {
    std::fs::metadata(path).map_err(|e| ChurnError::resource("read", path, e))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let lf = match extension.as_str() {
        "csv" | "txt" => LazyCsvReader::new(path)
            .with_separator(separator)
            .with_infer_schema_length(infer_schema_length)
            .finish()?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())?,
        _ => {
            return Err(ChurnError::resource(
                "load",
                path,
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!(
                        "unsupported file format '{}'; supported formats: csv, parquet",
                        extension
                    ),
                ),
            ))
        }
    };

    let df = lf.collect()?;
    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded dataset"
    );
    Ok(df)
}

/// Load the raw export named by the configuration.
pub fn load_raw_table(config: &PipelineConfig) -> Result<DataFrame> {
    load_dataset(
        &config.raw_data_path,
        config.separator,
        config.infer_schema_length,
    )
}

/// Reload the persisted cleaned table, for stages run on their own.
pub fn load_cleaned_table(config: &PipelineConfig) -> Result<DataFrame> {
    load_dataset(
        &config.cleaned_data_path,
        config.separator,
        config.infer_schema_length,
    )
}

/// Estimated in-memory size of a table in megabytes
pub fn estimated_memory_mb(df: &DataFrame) -> f64 {
    df.estimated_size() as f64 / (1024.0 * 1024.0)
}
