//! Column names and fixed recoding tables for the telco churn dataset

use polars::prelude::*;

use crate::error::{ChurnError, DataIntegrityError, Result};

pub const CUSTOMER_ID: &str = "customerID";
pub const GENDER: &str = "gender";
pub const SENIOR_CITIZEN: &str = "SeniorCitizen";
pub const PARTNER: &str = "Partner";
pub const DEPENDENTS: &str = "Dependents";
pub const TENURE: &str = "tenure";
pub const PHONE_SERVICE: &str = "PhoneService";
pub const MULTIPLE_LINES: &str = "MultipleLines";
pub const INTERNET_SERVICE: &str = "InternetService";
pub const ONLINE_SECURITY: &str = "OnlineSecurity";
pub const ONLINE_BACKUP: &str = "OnlineBackup";
pub const DEVICE_PROTECTION: &str = "DeviceProtection";
pub const TECH_SUPPORT: &str = "TechSupport";
pub const STREAMING_TV: &str = "StreamingTV";
pub const STREAMING_MOVIES: &str = "StreamingMovies";
pub const CONTRACT: &str = "Contract";
pub const PAPERLESS_BILLING: &str = "PaperlessBilling";
pub const PAYMENT_METHOD: &str = "PaymentMethod";
pub const MONTHLY_CHARGES: &str = "MonthlyCharges";
pub const TOTAL_CHARGES: &str = "TotalCharges";
pub const CHURN: &str = "Churn";
pub const TENURE_GROUP: &str = "tenure_group";

/// Header of the raw export, in file order
pub const RAW_COLUMNS: [&str; 21] = [
    CUSTOMER_ID,
    GENDER,
    SENIOR_CITIZEN,
    PARTNER,
    DEPENDENTS,
    TENURE,
    PHONE_SERVICE,
    MULTIPLE_LINES,
    INTERNET_SERVICE,
    ONLINE_SECURITY,
    ONLINE_BACKUP,
    DEVICE_PROTECTION,
    TECH_SUPPORT,
    STREAMING_TV,
    STREAMING_MOVIES,
    CONTRACT,
    PAPERLESS_BILLING,
    PAYMENT_METHOD,
    MONTHLY_CHARGES,
    TOTAL_CHARGES,
    CHURN,
];

/// Explicit value→code rule for a two-valued categorical column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryEncoding {
    pub column: &'static str,
    /// Value that encodes to 1
    pub positive: &'static str,
    /// Value that encodes to 0
    pub negative: &'static str,
}

impl BinaryEncoding {
    pub const fn yes_no(column: &'static str) -> Self {
        Self {
            column,
            positive: "Yes",
            negative: "No",
        }
    }

    pub fn encode(&self, value: &str) -> Option<i32> {
        if value == self.positive {
            Some(1)
        } else if value == self.negative {
            Some(0)
        } else {
            None
        }
    }
}

/// The seven binary columns of the cleaned table
pub const BINARY_ENCODINGS: [BinaryEncoding; 7] = [
    BinaryEncoding {
        column: GENDER,
        positive: "Female",
        negative: "Male",
    },
    BinaryEncoding::yes_no(SENIOR_CITIZEN),
    BinaryEncoding::yes_no(PARTNER),
    BinaryEncoding::yes_no(DEPENDENTS),
    BinaryEncoding::yes_no(PHONE_SERVICE),
    BinaryEncoding::yes_no(PAPERLESS_BILLING),
    BinaryEncoding::yes_no(CHURN),
];

/// Columns with three or more categories, expanded into indicator columns
pub const MULTI_CATEGORY_COLUMNS: [&str; 10] = [
    MULTIPLE_LINES,
    INTERNET_SERVICE,
    ONLINE_SECURITY,
    ONLINE_BACKUP,
    DEVICE_PROTECTION,
    TECH_SUPPORT,
    STREAMING_TV,
    STREAMING_MOVIES,
    CONTRACT,
    PAYMENT_METHOD,
];

/// Grouping columns scanned for the highest-churn segment
pub const TOP_SEGMENT_COLUMNS: [&str; 3] = [CONTRACT, INTERNET_SERVICE, PAYMENT_METHOD];

/// Look up a column, reporting absence as a data integrity failure.
pub fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name).map_err(|_| {
        ChurnError::from(DataIntegrityError::MissingColumn {
            column: name.to_string(),
        })
    })
}

/// Column names in table order
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Render every cell of a column as text, keeping nulls as `None`.
pub fn column_to_string_vec(col: &Column) -> Result<Vec<Option<String>>> {
    let values: Vec<Option<String>> = match col.dtype() {
        DataType::String => col
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect(),
        DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 => {
            let cast = col.cast(&DataType::Int64)?;
            cast.i64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        DataType::UInt8 | DataType::UInt16 | DataType::UInt32 | DataType::UInt64 => {
            let cast = col.cast(&DataType::UInt64)?;
            cast.u64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        DataType::Float32 | DataType::Float64 => {
            let cast = col.cast(&DataType::Float64)?;
            cast.f64()?
                .into_iter()
                .map(|v| v.map(|n| format!("{}", n)))
                .collect()
        }
        DataType::Boolean => col
            .bool()?
            .into_iter()
            .map(|v| v.map(|b| b.to_string()))
            .collect(),
        _ => {
            let cast = col.cast(&DataType::String)?;
            cast.str()?
                .into_iter()
                .map(|v| v.map(|s| s.to_string()))
                .collect()
        }
    };

    Ok(values)
}

/// Numeric view of a column as `f64`, failing on non-numeric storage.
pub fn numeric_values(col: &Column) -> Result<Vec<Option<f64>>> {
    if !col.dtype().is_primitive_numeric() {
        return Err(DataIntegrityError::UnexpectedType {
            column: col.name().to_string(),
            dtype: col.dtype().to_string(),
            expected: "a numeric type",
        }
        .into());
    }
    let cast = col.cast(&DataType::Float64)?;
    Ok(cast.f64()?.into_iter().collect())
}

/// Values of a charge or duration column: present, finite and non-negative.
pub fn non_negative_values(col: &Column) -> Result<Vec<f64>> {
    let column = col.name().to_string();
    let mut values = Vec::with_capacity(col.len());
    for (row, v) in numeric_values(col)?.into_iter().enumerate() {
        let x = v.ok_or_else(|| DataIntegrityError::UnexpectedValue {
            column: column.clone(),
            row,
            value: "null".to_string(),
        })?;
        if !x.is_finite() || x < 0.0 {
            return Err(DataIntegrityError::OutOfRange {
                column,
                row,
                value: x,
                min: 0.0,
                max: f64::INFINITY,
            }
            .into());
        }
        values.push(x);
    }
    Ok(values)
}
