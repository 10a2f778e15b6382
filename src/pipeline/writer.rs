//! Output writing
//!
//! Every file is written to a temporary file in the destination directory
//! and renamed into place once complete, so a failed write never leaves a
//! partial file at the target path.

use std::io::Write;
use std::path::Path;

use polars::prelude::*;
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{ChurnError, Result};

fn temp_file_beside(path: &Path) -> Result<NamedTempFile> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    NamedTempFile::new_in(dir).map_err(|e| ChurnError::resource("create temp file in", dir, e))
}

fn persist(tmp: NamedTempFile, path: &Path) -> Result<()> {
    tmp.persist(path)
        .map_err(|e| ChurnError::resource("write", path, e.error))?;
    Ok(())
}

/// Save dataset to file (CSV or Parquet based on extension)
pub fn save_dataset(df: &mut DataFrame, path: &Path, separator: u8) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let mut tmp = temp_file_beside(path)?;
    match extension.as_str() {
        "csv" | "txt" => {
            CsvWriter::new(tmp.as_file_mut())
                .with_separator(separator)
                .finish(df)?;
        }
        "parquet" => {
            ParquetWriter::new(tmp.as_file_mut()).finish(df)?;
        }
        _ => {
            return Err(ChurnError::resource(
                "write",
                path,
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!(
                        "unsupported output format '{}'; supported formats: csv, parquet",
                        extension
                    ),
                ),
            ))
        }
    }
    persist(tmp, path)?;

    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "saved dataset"
    );
    Ok(())
}

/// Write a text file in one step.
pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    let mut tmp = temp_file_beside(path)?;
    tmp.write_all(contents.as_bytes())
        .map_err(|e| ChurnError::resource("write", path, e))?;
    persist(tmp, path)
}
