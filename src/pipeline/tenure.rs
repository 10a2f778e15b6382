//! Tenure bucketing into fixed ordinal groups

use polars::prelude::*;
use tracing::debug;

use crate::error::{DataIntegrityError, Result};
use crate::pipeline::columns::{numeric_values, require_column, TENURE, TENURE_GROUP};

/// Smallest tenure the bins accept, in months
pub const MIN_TENURE: f64 = 0.0;
/// Largest tenure the bins accept, in months
pub const MAX_TENURE: f64 = 72.0;

/// Right-closed upper bounds and their labels, in ascending order.
/// Bin i covers (bound[i-1], bound[i]]; tenure 0 falls into the first bin.
pub const TENURE_BUCKETS: [(f64, &str); 5] = [
    (12.0, "0-1 year"),
    (24.0, "1-2 years"),
    (48.0, "2-4 years"),
    (60.0, "4-5 years"),
    (72.0, "5-6 years"),
];

/// Label for a tenure in months, or `None` outside [0, 72].
pub fn tenure_bucket(months: f64) -> Option<&'static str> {
    if !(MIN_TENURE..=MAX_TENURE).contains(&months) {
        return None;
    }
    TENURE_BUCKETS
        .iter()
        .find(|(upper, _)| months <= *upper)
        .map(|(_, label)| *label)
}

/// Append `tenure_group` derived from `tenure`.
pub fn create_tenure_groups(mut df: DataFrame) -> Result<DataFrame> {
    let tenure = require_column(&df, TENURE)?;
    let values = numeric_values(tenure)?;

    let mut groups: Vec<&'static str> = Vec::with_capacity(values.len());
    for (row, v) in values.into_iter().enumerate() {
        let months = v.ok_or_else(|| DataIntegrityError::UnexpectedValue {
            column: TENURE.to_string(),
            row,
            value: "null".to_string(),
        })?;
        let label = tenure_bucket(months).ok_or(DataIntegrityError::OutOfRange {
            column: TENURE.to_string(),
            row,
            value: months,
            min: MIN_TENURE,
            max: MAX_TENURE,
        })?;
        groups.push(label);
    }

    df.with_column(Column::new(TENURE_GROUP.into(), groups))?;
    debug!("created tenure groups");
    Ok(df)
}
