//! Binary encoding of two-valued categorical columns

use polars::prelude::*;
use tracing::debug;

use crate::error::{DataIntegrityError, Result};
use crate::pipeline::columns::{column_to_string_vec, require_column, BinaryEncoding};

/// Rewrite each listed column in place as `Int32` 0/1.
///
/// The mapping per column is explicit, never inferred from the data.
/// Columns not in `encodings` are left alone. A cell outside a column's
/// two-value domain (nulls included) aborts the encoding.
pub fn encode_binary_columns(
    mut df: DataFrame,
    encodings: &[BinaryEncoding],
) -> Result<DataFrame> {
    for encoding in encodings {
        let col = require_column(&df, encoding.column)?;
        let cells = column_to_string_vec(col)?;

        let mut codes: Vec<i32> = Vec::with_capacity(cells.len());
        for (row, cell) in cells.iter().enumerate() {
            let code = cell
                .as_deref()
                .and_then(|v| encoding.encode(v))
                .ok_or_else(|| DataIntegrityError::UnexpectedValue {
                    column: encoding.column.to_string(),
                    row,
                    value: cell.clone().unwrap_or_else(|| "null".to_string()),
                })?;
            codes.push(code);
        }

        df.with_column(Column::new(encoding.column.into(), codes))?;
        debug!(
            column = encoding.column,
            positive = encoding.positive,
            "encoded binary column"
        );
    }
    Ok(df)
}
