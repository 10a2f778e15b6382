//! Full-row duplicate removal

use polars::prelude::*;
use tracing::debug;

use crate::error::Result;

/// Drop rows that repeat an earlier row across every column.
///
/// The first occurrence survives and the relative order of the remaining
/// rows is kept. Run this after the repair stage: rows are compared on
/// their repaired values, so a blank `TotalCharges` and an explicit `0`
/// count as the same cell. Returns the table and the number of rows removed.
pub fn remove_duplicates(df: DataFrame) -> Result<(DataFrame, usize)> {
    let before = df.height();
    if before == 0 {
        return Ok((df, 0));
    }

    let deduped = df
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()?;
    let removed = before - deduped.height();

    if removed == 0 {
        debug!("no duplicate rows found");
    } else {
        debug!(removed, "removed duplicate rows");
    }
    Ok((deduped, removed))
}

/// Number of rows that [`remove_duplicates`] would drop.
pub fn count_duplicates(df: &DataFrame) -> Result<usize> {
    let (_, removed) = remove_duplicates(df.clone())?;
    Ok(removed)
}
