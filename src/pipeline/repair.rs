//! Column repair - the two documented defects of the raw export
//!
//! `TotalCharges` carries a blank string for customers who have not been
//! billed yet (zero tenure), which forces the whole column to text.
//! `SeniorCitizen` is 0/1 while every other binary column is No/Yes.
//! The identifier column is dropped here as well.

use polars::prelude::*;
use tracing::debug;

use crate::error::{DataIntegrityError, Result};
use crate::pipeline::columns::{
    column_names, column_to_string_vec, require_column, CUSTOMER_ID, SENIOR_CITIZEN,
    TOTAL_CHARGES,
};

/// What the repair stage changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairReport {
    /// `TotalCharges` cells that were blank and imputed as zero
    pub imputed_total_charges: usize,
}

/// Remove the customer identifier column.
pub fn drop_identifier(df: DataFrame) -> Result<DataFrame> {
    require_column(&df, CUSTOMER_ID)?;
    Ok(df.drop(CUSTOMER_ID)?)
}

/// Coerce `TotalCharges` to `Float64`, imputing blanks as zero.
///
/// Returns the number of imputed cells. A value that is neither blank nor
/// a decimal number aborts the repair; so does a negative charge.
pub fn repair_total_charges(mut df: DataFrame) -> Result<(DataFrame, usize)> {
    let col = require_column(&df, TOTAL_CHARGES)?;

    let mut imputed = 0usize;
    let mut values: Vec<f64> = Vec::with_capacity(col.len());

    if col.dtype().is_primitive_numeric() {
        let cast = col.cast(&DataType::Float64)?;
        for v in cast.f64()?.into_iter() {
            match v {
                Some(x) => values.push(x),
                None => {
                    imputed += 1;
                    values.push(0.0);
                }
            }
        }
    } else if col.dtype() == &DataType::String {
        for (row, v) in col.str()?.into_iter().enumerate() {
            let trimmed = v.map(str::trim).unwrap_or("");
            if trimmed.is_empty() {
                imputed += 1;
                values.push(0.0);
                continue;
            }
            let parsed: f64 = trimmed.parse().map_err(|_| DataIntegrityError::UnexpectedValue {
                column: TOTAL_CHARGES.to_string(),
                row,
                value: v.unwrap_or_default().to_string(),
            })?;
            values.push(parsed);
        }
    } else {
        return Err(DataIntegrityError::UnexpectedType {
            column: TOTAL_CHARGES.to_string(),
            dtype: col.dtype().to_string(),
            expected: "String or a numeric type",
        }
        .into());
    }

    for (row, &x) in values.iter().enumerate() {
        if !x.is_finite() || x < 0.0 {
            return Err(DataIntegrityError::OutOfRange {
                column: TOTAL_CHARGES.to_string(),
                row,
                value: x,
                min: 0.0,
                max: f64::INFINITY,
            }
            .into());
        }
    }

    df.with_column(Column::new(TOTAL_CHARGES.into(), values))?;
    debug!(imputed, "repaired TotalCharges");
    Ok((df, imputed))
}

/// Recode `SeniorCitizen` from 0/1 to "No"/"Yes".
pub fn repair_senior_citizen(mut df: DataFrame) -> Result<DataFrame> {
    let col = require_column(&df, SENIOR_CITIZEN)?;

    let is_textual = col.dtype() == &DataType::String;
    if !is_textual && !col.dtype().is_primitive_numeric() {
        return Err(DataIntegrityError::UnexpectedType {
            column: SENIOR_CITIZEN.to_string(),
            dtype: col.dtype().to_string(),
            expected: "an integer type",
        }
        .into());
    }

    let cells = column_to_string_vec(col)?;
    let mut recoded: Vec<&'static str> = Vec::with_capacity(cells.len());
    for (row, cell) in cells.iter().enumerate() {
        let code = cell.as_deref().map(str::trim);
        let label = match code {
            Some("0") => "No",
            Some("1") => "Yes",
            _ => {
                return Err(DataIntegrityError::UnexpectedValue {
                    column: SENIOR_CITIZEN.to_string(),
                    row,
                    value: cell.clone().unwrap_or_else(|| "null".to_string()),
                }
                .into())
            }
        };
        recoded.push(label);
    }

    df.with_column(Column::new(SENIOR_CITIZEN.into(), recoded))?;
    debug!("recoded SeniorCitizen to No/Yes");
    Ok(df)
}

/// Apply every repair in order: identifier drop, `TotalCharges`, `SeniorCitizen`.
pub fn repair_columns(df: DataFrame) -> Result<(DataFrame, RepairReport)> {
    let df = drop_identifier(df)?;
    let (df, imputed_total_charges) = repair_total_charges(df)?;
    let df = repair_senior_citizen(df)?;
    Ok((
        df,
        RepairReport {
            imputed_total_charges,
        },
    ))
}

/// Check the invariants every cleaned table must satisfy.
///
/// - no blank or whitespace-only string cells in any column
/// - `TotalCharges` is `Float64` and non-negative
/// - `SeniorCitizen` only holds "No"/"Yes"
/// - the identifier column is gone
pub fn validate_cleaned_table(df: &DataFrame) -> Result<()> {
    if column_names(df).iter().any(|c| c == CUSTOMER_ID) {
        return Err(DataIntegrityError::UnexpectedColumn {
            column: CUSTOMER_ID.to_string(),
        }
        .into());
    }

    for col in df.get_columns() {
        if col.dtype() != &DataType::String {
            continue;
        }
        for (row, v) in col.str()?.into_iter().enumerate() {
            if v.map_or(true, |s| s.trim().is_empty()) {
                return Err(DataIntegrityError::BlankCell {
                    column: col.name().to_string(),
                    row,
                }
                .into());
            }
        }
    }

    let total = require_column(df, TOTAL_CHARGES)?;
    if total.dtype() != &DataType::Float64 {
        return Err(DataIntegrityError::UnexpectedType {
            column: TOTAL_CHARGES.to_string(),
            dtype: total.dtype().to_string(),
            expected: "Float64",
        }
        .into());
    }
    for (row, v) in total.f64()?.into_iter().enumerate() {
        match v {
            Some(x) if x >= 0.0 => {}
            other => {
                return Err(DataIntegrityError::OutOfRange {
                    column: TOTAL_CHARGES.to_string(),
                    row,
                    value: other.unwrap_or(f64::NAN),
                    min: 0.0,
                    max: f64::INFINITY,
                }
                .into())
            }
        }
    }

    let senior = require_column(df, SENIOR_CITIZEN)?;
    for (row, v) in column_to_string_vec(senior)?.into_iter().enumerate() {
        match v.as_deref() {
            Some("No") | Some("Yes") => {}
            _ => {
                return Err(DataIntegrityError::UnexpectedValue {
                    column: SENIOR_CITIZEN.to_string(),
                    row,
                    value: v.clone().unwrap_or_else(|| "null".to_string()),
                }
                .into())
            }
        }
    }

    Ok(())
}
