//! Tests for the text report and chart data export

use churnlens::pipeline::{clean_table, compute_report_data};
use churnlens::report::*;
use polars::prelude::*;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_report_for_small_export() {
    let cleaned = clean_table(create_small_raw_dataframe()).unwrap().table;
    let data = compute_report_data(&cleaned).unwrap();
    let report = render_report(&data);

    assert!(report.starts_with("=========="));
    assert!(report.contains("Total Customers     : 12"));
    assert!(report.contains("Total Features      : 20"));
    assert!(report.contains("Churned Customers   : 3"));
    assert!(report.contains("Retained Customers  : 9"));
    assert!(report.contains("Avg Customer Tenure : 26.2 months"));
    assert!(report.contains("Highest churn segments:"));
    assert!(report.contains("  - Contract: Month-to-month (50.00% churn rate)"));
    assert!(report.contains("  - Internet Service: "));
    assert!(report.contains("  - Payment Method: "));
}

#[test]
fn test_save_report_writes_exact_text() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("churn_summary_report.txt");

    save_report("REPORT BODY\n", &path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "REPORT BODY\n");
}

#[test]
fn test_save_report_into_missing_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing/report.txt");

    let err = save_report("x", &path).unwrap_err();
    assert!(err.is_resource());
}

#[test]
fn test_exported_chart_json() {
    let cleaned = clean_table(create_small_raw_dataframe()).unwrap().table;
    let temp_dir = TempDir::new().unwrap();

    let paths = export_charts(&cleaned, temp_dir.path()).unwrap();
    assert_eq!(paths.len(), 4);

    let text = std::fs::read_to_string(temp_dir.path().join("churn_by_contract.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["kind"], "bar");
    assert_eq!(json["y_label"], "Churn Rate (%)");
    assert_eq!(
        json["categories"],
        serde_json::json!(["Month-to-month", "One year", "Two year"])
    );
    assert_eq!(json["series"][0]["values"], serde_json::json!([50.0, 0.0, 0.0]));
    assert_eq!(json["metadata"]["source_rows"], 12);

    let text =
        std::fs::read_to_string(temp_dir.path().join("monthly_charges_by_churn.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["kind"], "histogram");
    assert_eq!(json["bin_edges"].as_array().unwrap().len(), HISTOGRAM_BINS + 1);
    assert_eq!(json["series"][1]["name"], "Churn = Yes");
}

#[test]
fn test_nan_monthly_charge_fails_report_and_charts() {
    let mut raw = create_small_raw_dataframe();
    let mut charges: Vec<f64> = raw
        .column("MonthlyCharges")
        .unwrap()
        .f64()
        .unwrap()
        .into_no_null_iter()
        .collect();
    charges[0] = f64::NAN;
    raw.with_column(Column::new("MonthlyCharges".into(), charges))
        .unwrap();

    let cleaned = clean_table(raw).unwrap().table;

    let err = compute_report_data(&cleaned).unwrap_err();
    assert!(err.is_data_integrity());
    assert_eq!(err.error_code(), "OUT_OF_RANGE");

    let err = build_charts(&cleaned).unwrap_err();
    assert_eq!(err.error_code(), "OUT_OF_RANGE");
}
