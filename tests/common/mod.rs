//! Shared test utilities and fixture generators
#![allow(dead_code)]

use churnlens::config::PipelineConfig;
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tempfile::TempDir;

/// Contract split of the reference export: (contract, customers, churned)
pub const REFERENCE_CONTRACTS: [(&str, usize, usize); 3] = [
    ("Month-to-month", 3875, 1655),
    ("One year", 1473, 166),
    ("Two year", 1695, 48),
];
pub const REFERENCE_ROWS: usize = 7043;
pub const REFERENCE_CHURNED: usize = 1869;

/// Every 640th row (starting at row 5) is a new customer with a blank TotalCharges
pub fn is_blank_charges_row(i: usize) -> bool {
    i % 640 == 5
}

pub fn blank_charges_rows(rows: usize) -> usize {
    (0..rows).filter(|i| is_blank_charges_row(*i)).count()
}

pub const PAYMENT_METHODS: [&str; 4] = [
    "Bank transfer (automatic)",
    "Credit card (automatic)",
    "Electronic check",
    "Mailed check",
];

fn pick<'a>(rng: &mut StdRng, choices: &[&'a str]) -> &'a str {
    choices[rng.gen_range(0..choices.len())]
}

/// Create a raw Telco export with an exact contract / churn split.
///
/// Column order and types match the real export: `SeniorCitizen` is 0/1,
/// `TotalCharges` is text with a single space for brand-new customers.
/// Every row is unique once `customerID` is dropped.
pub fn create_telco_raw_dataframe(contracts: &[(&str, usize, usize)], seed: u64) -> DataFrame {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut assignments: Vec<(&str, bool)> = Vec::new();
    for &(contract, total, churned) in contracts {
        for j in 0..total {
            assignments.push((contract, j < churned));
        }
    }
    assignments.shuffle(&mut rng);
    let rows = assignments.len();

    let mut customer_id = Vec::with_capacity(rows);
    let mut gender = Vec::with_capacity(rows);
    let mut senior = Vec::with_capacity(rows);
    let mut partner = Vec::with_capacity(rows);
    let mut dependents = Vec::with_capacity(rows);
    let mut tenure = Vec::with_capacity(rows);
    let mut phone = Vec::with_capacity(rows);
    let mut multiple_lines = Vec::with_capacity(rows);
    let mut internet = Vec::with_capacity(rows);
    let mut services: Vec<Vec<&str>> = vec![Vec::with_capacity(rows); 6];
    let mut contract_col = Vec::with_capacity(rows);
    let mut paperless = Vec::with_capacity(rows);
    let mut payment = Vec::with_capacity(rows);
    let mut monthly = Vec::with_capacity(rows);
    let mut total = Vec::with_capacity(rows);
    let mut churn = Vec::with_capacity(rows);

    for (i, (contract, churned)) in assignments.into_iter().enumerate() {
        customer_id.push(format!("{:04}-TLCO", i));
        gender.push(pick(&mut rng, &["Female", "Male"]));
        senior.push(rng.gen_range(0..2i64));
        partner.push(pick(&mut rng, &["Yes", "No"]));
        dependents.push(pick(&mut rng, &["Yes", "No"]));

        let months: i64 = if is_blank_charges_row(i) {
            0
        } else {
            rng.gen_range(1..=72)
        };
        tenure.push(months);

        let has_phone = rng.gen_bool(0.9);
        phone.push(if has_phone { "Yes" } else { "No" });
        multiple_lines.push(if has_phone {
            pick(&mut rng, &["Yes", "No"])
        } else {
            "No phone service"
        });

        let service = pick(&mut rng, &["DSL", "Fiber optic", "No"]);
        internet.push(service);
        for column in services.iter_mut() {
            column.push(if service == "No" {
                "No internet service"
            } else {
                pick(&mut rng, &["Yes", "No"])
            });
        }

        contract_col.push(contract);
        paperless.push(pick(&mut rng, &["Yes", "No"]));
        payment.push(pick(&mut rng, &PAYMENT_METHODS));

        // unique per row, so no two customers collide after dropping the id
        let charge = (1825 + i) as f64 / 100.0;
        monthly.push(charge);
        total.push(if months == 0 {
            " ".to_string()
        } else {
            format!("{:.2}", charge * months as f64)
        });
        churn.push(if churned { "Yes" } else { "No" });
    }

    let service_names = [
        "OnlineSecurity",
        "OnlineBackup",
        "DeviceProtection",
        "TechSupport",
        "StreamingTV",
        "StreamingMovies",
    ];
    let mut columns = vec![
        Column::new("customerID".into(), customer_id),
        Column::new("gender".into(), gender),
        Column::new("SeniorCitizen".into(), senior),
        Column::new("Partner".into(), partner),
        Column::new("Dependents".into(), dependents),
        Column::new("tenure".into(), tenure),
        Column::new("PhoneService".into(), phone),
        Column::new("MultipleLines".into(), multiple_lines),
        Column::new("InternetService".into(), internet),
    ];
    for (name, values) in service_names.iter().zip(services) {
        columns.push(Column::new((*name).into(), values));
    }
    columns.extend([
        Column::new("Contract".into(), contract_col),
        Column::new("PaperlessBilling".into(), paperless),
        Column::new("PaymentMethod".into(), payment),
        Column::new("MonthlyCharges".into(), monthly),
        Column::new("TotalCharges".into(), total),
        Column::new("Churn".into(), churn),
    ]);

    DataFrame::new(columns).unwrap()
}

/// The 7,043-row reference-shaped export
pub fn create_reference_raw_dataframe() -> DataFrame {
    create_telco_raw_dataframe(&REFERENCE_CONTRACTS, 42)
}

/// A 12-row export that still covers every category of every column
pub fn create_small_raw_dataframe() -> DataFrame {
    df! {
        "customerID" => ["0001-A", "0002-B", "0003-C", "0004-D", "0005-E", "0006-F",
                         "0007-G", "0008-H", "0009-I", "0010-J", "0011-K", "0012-L"],
        "gender" => ["Female", "Male", "Male", "Female", "Female", "Male",
                     "Female", "Male", "Female", "Male", "Female", "Male"],
        "SeniorCitizen" => [0i64, 0, 1, 0, 1, 0, 0, 1, 0, 0, 1, 0],
        "Partner" => ["Yes", "No", "No", "Yes", "No", "Yes", "No", "No", "Yes", "Yes", "No", "No"],
        "Dependents" => ["No", "No", "Yes", "No", "No", "Yes", "No", "No", "Yes", "No", "No", "No"],
        "tenure" => [1i64, 34, 2, 45, 0, 8, 22, 10, 72, 13, 58, 49],
        "PhoneService" => ["No", "Yes", "Yes", "No", "Yes", "Yes", "Yes", "No", "Yes", "Yes", "Yes", "Yes"],
        "MultipleLines" => ["No phone service", "No", "No", "No phone service", "Yes", "Yes",
                            "Yes", "No phone service", "Yes", "No", "Yes", "No"],
        "InternetService" => ["DSL", "DSL", "DSL", "DSL", "Fiber optic", "Fiber optic",
                              "Fiber optic", "DSL", "No", "No", "Fiber optic", "No"],
        "OnlineSecurity" => ["No", "Yes", "Yes", "Yes", "No", "No", "No", "Yes",
                             "No internet service", "No internet service", "No", "No internet service"],
        "OnlineBackup" => ["Yes", "No", "Yes", "No", "No", "No", "Yes", "No",
                           "No internet service", "No internet service", "Yes", "No internet service"],
        "DeviceProtection" => ["No", "Yes", "No", "Yes", "No", "Yes", "No", "No",
                               "No internet service", "No internet service", "Yes", "No internet service"],
        "TechSupport" => ["No", "No", "No", "Yes", "No", "No", "No", "No",
                          "No internet service", "No internet service", "No", "No internet service"],
        "StreamingTV" => ["No", "No", "No", "No", "No", "Yes", "Yes", "No",
                          "No internet service", "No internet service", "Yes", "No internet service"],
        "StreamingMovies" => ["No", "No", "No", "No", "No", "Yes", "No", "No",
                              "No internet service", "No internet service", "Yes", "No internet service"],
        "Contract" => ["Month-to-month", "One year", "Month-to-month", "One year", "Month-to-month",
                       "Month-to-month", "Month-to-month", "Month-to-month", "Two year", "One year",
                       "Two year", "Two year"],
        "PaperlessBilling" => ["Yes", "No", "Yes", "No", "Yes", "Yes", "Yes", "No", "No", "No", "Yes", "No"],
        "PaymentMethod" => ["Electronic check", "Mailed check", "Mailed check", "Bank transfer (automatic)",
                            "Electronic check", "Electronic check", "Credit card (automatic)",
                            "Mailed check", "Credit card (automatic)", "Bank transfer (automatic)",
                            "Bank transfer (automatic)", "Mailed check"],
        "MonthlyCharges" => [29.85f64, 56.95, 53.85, 42.30, 70.70, 99.65, 89.10, 29.75, 19.80, 20.15, 105.50, 19.65],
        "TotalCharges" => ["29.85", "1889.5", "108.15", "1840.75", " ", "820.5", "1949.4", "301.9",
                           "1424.6", "261.65", "6103.3", "958.25"],
        "Churn" => ["No", "No", "Yes", "No", "Yes", "Yes", "No", "No", "No", "No", "No", "No"],
    }
    .unwrap()
}

/// Append copies of the first `n` rows under fresh customer ids.
pub fn with_duplicate_rows(df: &DataFrame, n: usize) -> DataFrame {
    let mut copies = df.slice(0, n);
    let ids: Vec<String> = (0..copies.height()).map(|i| format!("DUP-{:04}", i)).collect();
    copies
        .with_column(Column::new("customerID".into(), ids))
        .unwrap();
    df.vstack(&copies).unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("telco_churn.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("telco_churn.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// A temporary project root with the raw export at its default location
pub fn create_project(df: &mut DataFrame) -> (TempDir, PipelineConfig) {
    let temp_dir = TempDir::new().unwrap();
    let config = PipelineConfig::new(temp_dir.path());

    std::fs::create_dir_all(config.raw_data_path.parent().unwrap()).unwrap();
    let mut file = std::fs::File::create(&config.raw_data_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();
    config.ensure_output_dirs().unwrap();

    (temp_dir, config)
}

/// Text values of a column
pub fn string_values(df: &DataFrame, column: &str) -> Vec<String> {
    df.column(column)
        .unwrap()
        .str()
        .unwrap()
        .into_no_null_iter()
        .map(|s| s.to_string())
        .collect()
}

/// Int32 values of a column
pub fn i32_values(df: &DataFrame, column: &str) -> Vec<i32> {
    df.column(column)
        .unwrap()
        .i32()
        .unwrap()
        .into_no_null_iter()
        .collect()
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(
        rows, expected_rows,
        "Row count mismatch: expected {}, got {}",
        expected_rows, rows
    );
    assert_eq!(
        cols, expected_cols,
        "Column count mismatch: expected {}, got {}",
        expected_cols, cols
    );
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}
