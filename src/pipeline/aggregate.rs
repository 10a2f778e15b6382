//! Grouped churn counts and rates
//!
//! All rounded figures use round-half-away-from-zero on the scaled value
//! (`f64::round`), e.g. 42.7096... -> 42.71 and 0.125 -> 0.13.

use std::collections::BTreeMap;

use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::error::{DataIntegrityError, Result};
use crate::pipeline::columns::{
    column_to_string_vec, non_negative_values, require_column, CHURN, MONTHLY_CHARGES, TENURE,
};

/// Churn counts for one category of a grouping column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryChurn {
    pub category: String,
    pub total: usize,
    pub churned: usize,
    /// Percentage of `total` that churned, two decimals
    pub churn_rate: f64,
}

/// Churn counts per category, in the column's natural order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChurnBreakdown {
    pub column: String,
    pub categories: Vec<CategoryChurn>,
}

impl ChurnBreakdown {
    pub fn get(&self, category: &str) -> Option<&CategoryChurn> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Category with the highest churn rate; ties go to the earliest one.
    pub fn top(&self) -> Option<&CategoryChurn> {
        let mut best: Option<&CategoryChurn> = None;
        for entry in &self.categories {
            match best {
                Some(current) if entry.churn_rate <= current.churn_rate => {}
                _ => best = Some(entry),
            }
        }
        best
    }
}

/// Highest-churn category of one grouping column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopSegment {
    pub column: String,
    pub category: String,
    pub churn_rate: f64,
}

/// Headline metrics of a cleaned table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub total_customers: usize,
    pub total_features: usize,
    pub churned_count: usize,
    pub retained_count: usize,
    /// Percent, two decimals
    pub churn_rate: f64,
    /// Two decimals
    pub avg_monthly_charges: f64,
    /// Months, one decimal
    pub avg_tenure: f64,
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// `100 * churned / total` rounded to two decimals; 0.0 for an empty group.
pub fn churn_rate(churned: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to(churned as f64 / total as f64 * 100.0, 2)
}

/// Per-row churn indicator.
///
/// Accepts the cleaned "Yes"/"No" strings, the encoded 1/0 integers, or
/// booleans. Anything else (nulls included) is a data integrity failure.
pub fn churn_flags(df: &DataFrame) -> Result<Vec<bool>> {
    let col = require_column(df, CHURN)?;

    let cells = column_to_string_vec(col)?;
    let mut flags = Vec::with_capacity(cells.len());
    for (row, cell) in cells.iter().enumerate() {
        let flag = match cell.as_deref() {
            Some("Yes") | Some("1") | Some("true") => true,
            Some("No") | Some("0") | Some("false") => false,
            _ => {
                return Err(DataIntegrityError::UnexpectedValue {
                    column: CHURN.to_string(),
                    row,
                    value: cell.clone().unwrap_or_else(|| "null".to_string()),
                }
                .into())
            }
        };
        flags.push(flag);
    }
    Ok(flags)
}

/// Total, churned and churn rate for each distinct value of `column`.
///
/// Categories come back in natural order: numeric order for numeric
/// columns, byte-wise lexicographic order otherwise.
pub fn churn_by_category(df: &DataFrame, column: &str) -> Result<ChurnBreakdown> {
    let col = require_column(df, column)?;
    let is_numeric = col.dtype().is_primitive_numeric();
    let labels = column_to_string_vec(col)?;
    let flags = churn_flags(df)?;

    let mut counts: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    for (row, (label, churned)) in labels.into_iter().zip(flags).enumerate() {
        let label = label.ok_or_else(|| DataIntegrityError::UnexpectedValue {
            column: column.to_string(),
            row,
            value: "null".to_string(),
        })?;
        let entry = counts.entry(label).or_insert((0, 0));
        entry.0 += 1;
        if churned {
            entry.1 += 1;
        }
    }

    let mut categories: Vec<CategoryChurn> = counts
        .into_iter()
        .map(|(category, (total, churned))| CategoryChurn {
            category,
            total,
            churned,
            churn_rate: churn_rate(churned, total),
        })
        .collect();

    if is_numeric {
        categories.sort_by(|a, b| {
            let x: f64 = a.category.parse().unwrap_or(f64::NAN);
            let y: f64 = b.category.parse().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    debug!(column, groups = categories.len(), "computed churn by category");
    Ok(ChurnBreakdown {
        column: column.to_string(),
        categories,
    })
}

/// The highest-churn category for each grouping column, in input order.
pub fn top_churn_segments(df: &DataFrame, columns: &[&str]) -> Result<Vec<TopSegment>> {
    let mut segments = Vec::with_capacity(columns.len());
    for column in columns {
        let breakdown = churn_by_category(df, column)?;
        let top = breakdown.top().ok_or(DataIntegrityError::EmptyTable {
            what: "top churn segments",
        })?;
        segments.push(TopSegment {
            column: column.to_string(),
            category: top.category.clone(),
            churn_rate: top.churn_rate,
        });
    }
    Ok(segments)
}

/// Overview metrics: size, churn split and average charges / tenure.
pub fn dataset_summary(df: &DataFrame) -> Result<DatasetSummary> {
    let total_customers = df.height();
    if total_customers == 0 {
        return Err(DataIntegrityError::EmptyTable {
            what: "the dataset summary",
        }
        .into());
    }

    let churned_count = churn_flags(df)?.into_iter().filter(|c| *c).count();
    let avg_monthly_charges = column_mean(df, MONTHLY_CHARGES)?;
    let avg_tenure = column_mean(df, TENURE)?;

    Ok(DatasetSummary {
        total_customers,
        total_features: df.width(),
        churned_count,
        retained_count: total_customers - churned_count,
        churn_rate: churn_rate(churned_count, total_customers),
        avg_monthly_charges: round_to(avg_monthly_charges, 2),
        avg_tenure: round_to(avg_tenure, 1),
    })
}

fn column_mean(df: &DataFrame, column: &str) -> Result<f64> {
    let values = non_negative_values(require_column(df, column)?)?;
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}
