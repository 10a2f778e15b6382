//! Multi-category expansion into indicator columns
//!
//! Each listed column with k distinct categories is replaced, at its own
//! position, by k-1 `Int32` indicator columns named `{column}_{category}`.
//! The dropped reference category is the lexicographically first value
//! unless one is configured explicitly. An empty column yields no
//! indicators and an empty reference.

use std::collections::BTreeSet;

use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::error::{DataIntegrityError, Result};
use crate::pipeline::columns::{column_to_string_vec, require_column};

/// One column to expand, with an optional explicit reference category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryExpansion {
    pub column: String,
    pub reference: Option<String>,
}

impl CategoryExpansion {
    /// Expand `column`, dropping its lexicographically first category.
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            reference: None,
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

/// How a column was expanded, so the dropped category can be recovered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpansionRecord {
    pub column: String,
    pub reference: String,
    /// Indicator column names, in output order
    pub indicators: Vec<String>,
}

/// Name of the indicator column for one category
pub fn indicator_name(column: &str, category: &str) -> String {
    format!("{}_{}", column, category)
}

/// Default expansions: every name in `columns`, first category dropped.
pub fn default_expansions(columns: &[&str]) -> Vec<CategoryExpansion> {
    columns.iter().map(|c| CategoryExpansion::new(*c)).collect()
}

/// Replace each listed column with its indicator columns.
pub fn encode_multi_category_columns(
    df: DataFrame,
    expansions: &[CategoryExpansion],
) -> Result<(DataFrame, Vec<ExpansionRecord>)> {
    for expansion in expansions {
        require_column(&df, &expansion.column)?;
    }

    let mut columns: Vec<Column> = Vec::with_capacity(df.width() + expansions.len() * 3);
    let mut records: Vec<ExpansionRecord> = Vec::with_capacity(expansions.len());

    for col in df.get_columns() {
        let Some(expansion) = expansions
            .iter()
            .find(|e| e.column == col.name().as_str())
        else {
            columns.push(col.clone());
            continue;
        };

        let (indicators, record) = expand_column(col, expansion)?;
        debug!(
            column = %record.column,
            reference = %record.reference,
            indicators = record.indicators.len(),
            "expanded multi-category column"
        );
        columns.extend(indicators);
        records.push(record);
    }

    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for col in &columns {
        if !seen.insert(col.name().as_str()) {
            return Err(DataIntegrityError::UnexpectedColumn {
                column: col.name().to_string(),
            }
            .into());
        }
    }

    Ok((DataFrame::new(columns)?, records))
}

fn expand_column(
    col: &Column,
    expansion: &CategoryExpansion,
) -> Result<(Vec<Column>, ExpansionRecord)> {
    let column = expansion.column.as_str();

    let mut cells: Vec<String> = Vec::with_capacity(col.len());
    for (row, cell) in column_to_string_vec(col)?.into_iter().enumerate() {
        let value = cell.ok_or_else(|| DataIntegrityError::UnexpectedValue {
            column: column.to_string(),
            row,
            value: "null".to_string(),
        })?;
        cells.push(value);
    }

    let categories: BTreeSet<&str> = cells.iter().map(String::as_str).collect();

    if categories.is_empty() {
        return Ok((
            Vec::new(),
            ExpansionRecord {
                column: column.to_string(),
                reference: expansion.reference.clone().unwrap_or_default(),
                indicators: Vec::new(),
            },
        ));
    }

    let reference = match &expansion.reference {
        Some(explicit) => {
            if !categories.contains(explicit.as_str()) {
                return Err(DataIntegrityError::UnknownReference {
                    column: column.to_string(),
                    reference: explicit.clone(),
                }
                .into());
            }
            explicit.clone()
        }
        None => categories
            .iter()
            .next()
            .map(|first| first.to_string())
            .unwrap_or_default(),
    };

    let mut indicators: Vec<Column> = Vec::with_capacity(categories.len().saturating_sub(1));
    let mut names: Vec<String> = Vec::with_capacity(indicators.capacity());
    for category in categories.iter().filter(|c| **c != reference) {
        let name = indicator_name(column, category);
        let bits: Vec<i32> = cells
            .iter()
            .map(|v| i32::from(v.as_str() == *category))
            .collect();
        indicators.push(Column::new(name.as_str().into(), bits));
        names.push(name);
    }

    Ok((
        indicators,
        ExpansionRecord {
            column: column.to_string(),
            reference,
            indicators: names,
        },
    ))
}
