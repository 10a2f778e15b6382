//! Chart data export
//!
//! Each chart is written as a JSON [`ChartSpec`] holding everything a
//! plotting front end needs: kind, title, axis labels and the series.
//! Rendering to an image happens outside this crate.

use std::path::{Path, PathBuf};

use chrono::Utc;
use polars::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{DataIntegrityError, Result};
use crate::pipeline::aggregate::{churn_by_category, churn_flags, ChurnBreakdown};
use crate::pipeline::columns::{
    non_negative_values, require_column, CONTRACT, INTERNET_SERVICE, MONTHLY_CHARGES,
};
use crate::pipeline::writer::write_text;

/// Shared bin count of the monthly charges histogram
pub const HISTOGRAM_BINS: usize = 30;

pub const CHURN_DISTRIBUTION: &str = "churn_distribution";
pub const MONTHLY_CHARGES_BY_CHURN: &str = "monthly_charges_by_churn";
pub const CHURN_BY_CONTRACT: &str = "churn_by_contract";
pub const CHURN_BY_INTERNET_SERVICE: &str = "churn_by_internet_service";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Histogram,
}

/// One named sequence of values, aligned with the chart's categories or bins
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartMetadata {
    /// RFC 3339
    pub generated_at: String,
    pub generator_version: String,
    pub source_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub key: String,
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Bar labels; empty for histograms
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    /// `bins + 1` ascending edges; empty for bar charts
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bin_edges: Vec<f64>,
    pub series: Vec<Series>,
    pub metadata: ChartMetadata,
}

fn metadata(source_rows: usize) -> ChartMetadata {
    ChartMetadata {
        generated_at: Utc::now().to_rfc3339(),
        generator_version: env!("CARGO_PKG_VERSION").to_string(),
        source_rows,
    }
}

/// Churn value labels in the order "No", "Yes"
fn churn_label(churned: bool) -> &'static str {
    if churned {
        "Yes"
    } else {
        "No"
    }
}

/// Customer count per churn value.
pub fn churn_distribution_chart(df: &DataFrame) -> Result<ChartSpec> {
    let flags = churn_flags(df)?;
    let churned = flags.iter().filter(|c| **c).count();
    let retained = flags.len() - churned;

    Ok(ChartSpec {
        key: CHURN_DISTRIBUTION.to_string(),
        kind: ChartKind::Bar,
        title: "Customer Churn Distribution".to_string(),
        x_label: "Churn".to_string(),
        y_label: "Number of Customers".to_string(),
        categories: vec![churn_label(false).to_string(), churn_label(true).to_string()],
        bin_edges: Vec::new(),
        series: vec![Series {
            name: "Customers".to_string(),
            values: vec![retained as f64, churned as f64],
        }],
        metadata: metadata(df.height()),
    })
}

/// Equal-width edges spanning `[min, max]`.
///
/// A constant input gets a unit-wide range so every bin has positive width.
pub fn histogram_edges(min: f64, max: f64, bins: usize) -> Vec<f64> {
    let (lo, hi) = if max > min { (min, max) } else { (min - 0.5, min + 0.5) };
    let width = (hi - lo) / bins as f64;
    let mut edges: Vec<f64> = (0..bins).map(|i| lo + width * i as f64).collect();
    edges.push(hi);
    edges
}

/// Counts of `values` per bin. The last bin is closed on the right.
pub fn histogram_counts(values: &[f64], edges: &[f64]) -> Vec<f64> {
    let bins = edges.len().saturating_sub(1);
    let mut counts = vec![0.0; bins];
    if bins == 0 {
        return counts;
    }
    let lo = edges[0];
    let width = (edges[bins] - lo) / bins as f64;
    for v in values {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1.0;
    }
    counts
}

/// Monthly charges histogram, one series per churn value over shared bins.
pub fn monthly_charges_chart(df: &DataFrame) -> Result<ChartSpec> {
    let flags = churn_flags(df)?;
    let charges = non_negative_values(require_column(df, MONTHLY_CHARGES)?)?;

    let mut retained = Vec::new();
    let mut churned = Vec::new();
    for (value, flag) in charges.into_iter().zip(flags) {
        if flag {
            churned.push(value);
        } else {
            retained.push(value);
        }
    }

    let all = retained.iter().chain(churned.iter());
    let min = all.clone().copied().fold(f64::INFINITY, f64::min);
    let max = all.copied().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return Err(DataIntegrityError::EmptyTable {
            what: "the monthly charges histogram",
        }
        .into());
    }

    let edges = histogram_edges(min, max, HISTOGRAM_BINS);
    let series = vec![
        Series {
            name: format!("Churn = {}", churn_label(false)),
            values: histogram_counts(&retained, &edges),
        },
        Series {
            name: format!("Churn = {}", churn_label(true)),
            values: histogram_counts(&churned, &edges),
        },
    ];

    Ok(ChartSpec {
        key: MONTHLY_CHARGES_BY_CHURN.to_string(),
        kind: ChartKind::Histogram,
        title: "Monthly Charges Distribution by Churn Status".to_string(),
        x_label: "Monthly Charges ($)".to_string(),
        y_label: "Number of Customers".to_string(),
        categories: Vec::new(),
        bin_edges: edges,
        series,
        metadata: metadata(df.height()),
    })
}

/// Churn rate (%) per category as a bar chart.
pub fn churn_rate_chart(
    breakdown: &ChurnBreakdown,
    key: &str,
    title: &str,
    source_rows: usize,
) -> ChartSpec {
    ChartSpec {
        key: key.to_string(),
        kind: ChartKind::Bar,
        title: title.to_string(),
        x_label: breakdown.column.clone(),
        y_label: "Churn Rate (%)".to_string(),
        categories: breakdown
            .categories
            .iter()
            .map(|c| c.category.clone())
            .collect(),
        bin_edges: Vec::new(),
        series: vec![Series {
            name: "Churn Rate (%)".to_string(),
            values: breakdown.categories.iter().map(|c| c.churn_rate).collect(),
        }],
        metadata: metadata(source_rows),
    }
}

/// All four charts for a cleaned table.
pub fn build_charts(df: &DataFrame) -> Result<Vec<ChartSpec>> {
    let rows = df.height();
    Ok(vec![
        churn_distribution_chart(df)?,
        monthly_charges_chart(df)?,
        churn_rate_chart(
            &churn_by_category(df, CONTRACT)?,
            CHURN_BY_CONTRACT,
            "Churn Rate by Contract Type",
            rows,
        ),
        churn_rate_chart(
            &churn_by_category(df, INTERNET_SERVICE)?,
            CHURN_BY_INTERNET_SERVICE,
            "Churn Rate by Internet Service Type",
            rows,
        ),
    ])
}

/// Write one `<key>.json` per chart into `figures_dir`.
pub fn export_charts(df: &DataFrame, figures_dir: &Path) -> Result<Vec<PathBuf>> {
    let charts = build_charts(df)?;
    let mut written = Vec::with_capacity(charts.len());
    for chart in &charts {
        let path = figures_dir.join(format!("{}.json", chart.key));
        let json = serde_json::to_string_pretty(chart)?;
        write_text(&path, &json)?;
        debug!(path = %path.display(), "wrote chart data");
        written.push(path);
    }
    info!(charts = written.len(), dir = %figures_dir.display(), "exported chart data");
    Ok(written)
}
