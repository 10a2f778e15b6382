//! Stage composition: cleaning, feature engineering and reporting.
//!
//! The `*_table` functions are pure transformations over an in-memory
//! table. The `run_*` functions add the file I/O named by a
//! [`PipelineConfig`], writing each output only after its stage succeeded.

use polars::prelude::*;
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::pipeline::aggregate::{
    churn_by_category, dataset_summary, top_churn_segments, ChurnBreakdown, DatasetSummary,
    TopSegment,
};
use crate::pipeline::binary::encode_binary_columns;
use crate::pipeline::columns::{
    BINARY_ENCODINGS, CONTRACT, INTERNET_SERVICE, MULTI_CATEGORY_COLUMNS, TOP_SEGMENT_COLUMNS,
};
use crate::pipeline::dedup::remove_duplicates;
use crate::pipeline::dummies::{
    default_expansions, encode_multi_category_columns, CategoryExpansion, ExpansionRecord,
};
use crate::pipeline::loader::load_raw_table;
use crate::pipeline::repair::{repair_columns, validate_cleaned_table};
use crate::pipeline::tenure::create_tenure_groups;
use crate::pipeline::writer::save_dataset;

/// Result of the cleaning stage
#[derive(Debug, Clone)]
pub struct CleaningOutcome {
    pub table: DataFrame,
    pub rows_loaded: usize,
    pub columns_loaded: usize,
    pub imputed_total_charges: usize,
    pub duplicates_removed: usize,
}

/// Result of the feature engineering stage
#[derive(Debug, Clone)]
pub struct EngineeringOutcome {
    pub table: DataFrame,
    pub expansions: Vec<ExpansionRecord>,
}

/// Aggregates consumed by the text report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportData {
    pub summary: DatasetSummary,
    pub churn_by_contract: ChurnBreakdown,
    pub churn_by_internet: ChurnBreakdown,
    pub top_segments: Vec<TopSegment>,
}

/// Repair, deduplicate and validate a raw table.
pub fn clean_table(raw: DataFrame) -> Result<CleaningOutcome> {
    let (rows_loaded, columns_loaded) = raw.shape();

    let (repaired, repair) = repair_columns(raw)?;
    let (table, duplicates_removed) = remove_duplicates(repaired)?;
    validate_cleaned_table(&table)?;

    info!(
        rows = table.height(),
        columns = table.width(),
        imputed = repair.imputed_total_charges,
        duplicates_removed,
        "cleaned table"
    );

    Ok(CleaningOutcome {
        table,
        rows_loaded,
        columns_loaded,
        imputed_total_charges: repair.imputed_total_charges,
        duplicates_removed,
    })
}

/// Binary encoding, tenure bucketing and multi-category expansion, in that order.
pub fn engineer_features(cleaned: DataFrame) -> Result<EngineeringOutcome> {
    engineer_features_with(cleaned, &default_expansions(&MULTI_CATEGORY_COLUMNS))
}

/// Same as [`engineer_features`] with explicit expansion settings.
pub fn engineer_features_with(
    cleaned: DataFrame,
    expansions: &[CategoryExpansion],
) -> Result<EngineeringOutcome> {
    let df = encode_binary_columns(cleaned, &BINARY_ENCODINGS)?;
    // tenure_group must exist before expansion reshapes the table
    let df = create_tenure_groups(df)?;
    let (table, expansions) = encode_multi_category_columns(df, expansions)?;

    info!(columns = table.width(), "engineered features");
    Ok(EngineeringOutcome { table, expansions })
}

/// Every aggregate the report needs, computed from the cleaned table.
pub fn compute_report_data(cleaned: &DataFrame) -> Result<ReportData> {
    Ok(ReportData {
        summary: dataset_summary(cleaned)?,
        churn_by_contract: churn_by_category(cleaned, CONTRACT)?,
        churn_by_internet: churn_by_category(cleaned, INTERNET_SERVICE)?,
        top_segments: top_churn_segments(cleaned, &TOP_SEGMENT_COLUMNS)?,
    })
}

/// Load the raw export, clean it and persist the cleaned table.
pub fn run_cleaning(config: &PipelineConfig) -> Result<CleaningOutcome> {
    let raw = load_raw_table(config)?;
    let mut outcome = clean_table(raw)?;
    save_dataset(
        &mut outcome.table,
        &config.cleaned_data_path,
        config.separator,
    )?;
    Ok(outcome)
}

/// Engineer features from a cleaned table and persist the result.
pub fn run_feature_engineering(
    config: &PipelineConfig,
    cleaned: DataFrame,
) -> Result<EngineeringOutcome> {
    let mut outcome = engineer_features(cleaned)?;
    save_dataset(
        &mut outcome.table,
        &config.engineered_data_path,
        config.separator,
    )?;
    Ok(outcome)
}
