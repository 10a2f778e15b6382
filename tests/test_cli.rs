//! Tests for CLI argument parsing and the churnlens binary

use assert_cmd::Command;
use churnlens::cli::{Cli, Commands};
use churnlens::PipelineConfig;
use clap::Parser;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_cli_default_values() {
    let cli = Cli::parse_from(["churnlens"]);

    assert_eq!(cli.command(), Commands::Run);
    assert_eq!(cli.root, PathBuf::from("."));
    assert_eq!(cli.separator, b',');
    assert_eq!(
        cli.infer_schema_length, 10000,
        "Default schema inference should be 10000"
    );
    assert_eq!(cli.log_level, "warn");
    assert!(!cli.quiet);
    assert!(!cli.no_charts);
}

#[test]
fn test_cli_subcommands() {
    for (arg, expected) in [
        ("run", Commands::Run),
        ("clean", Commands::Clean),
        ("features", Commands::Features),
        ("report", Commands::Report),
        ("charts", Commands::Charts),
    ] {
        let cli = Cli::parse_from(["churnlens", arg]);
        assert_eq!(cli.command(), expected);
    }
}

#[test]
fn test_cli_input_overrides_raw_path_only() {
    let cli = Cli::parse_from(["churnlens", "--root", "/proj", "-i", "/tmp/raw.csv"]);
    let config = cli.config();

    assert_eq!(config.raw_data_path, PathBuf::from("/tmp/raw.csv"));
    assert_eq!(
        config.cleaned_data_path,
        PipelineConfig::new("/proj").cleaned_data_path
    );
}

#[test]
fn test_cli_tab_separator() {
    let cli = Cli::parse_from(["churnlens", "--separator", "tab"]);
    assert_eq!(cli.config().separator, b'\t');
}

#[test]
fn test_cli_rejects_multi_character_separator() {
    assert!(Cli::try_parse_from(["churnlens", "--separator", "::"]).is_err());
}

#[test]
fn test_cli_full_table_scan() {
    let cli = Cli::parse_from(["churnlens", "--infer-schema-length", "0"]);
    assert_eq!(cli.config().infer_schema_length, None);
}

#[test]
fn test_binary_runs_whole_pipeline() {
    let mut raw = create_small_raw_dataframe();
    let (temp_dir, config) = create_project(&mut raw);

    Command::cargo_bin("churnlens")
        .unwrap()
        .args(["--quiet", "--root"])
        .arg(temp_dir.path())
        .assert()
        .success();

    assert!(config.cleaned_data_path.exists());
    assert!(config.engineered_data_path.exists());
    assert!(config.report_path().exists());
    for key in [
        "churn_distribution",
        "monthly_charges_by_churn",
        "churn_by_contract",
        "churn_by_internet_service",
    ] {
        assert!(config.figures_dir.join(format!("{}.json", key)).exists());
    }

    let report = std::fs::read_to_string(config.report_path()).unwrap();
    assert!(report.contains("Overall Churn Rate  : 25.00%"));
}

#[test]
fn test_binary_no_charts_flag() {
    let mut raw = create_small_raw_dataframe();
    let (temp_dir, config) = create_project(&mut raw);

    Command::cargo_bin("churnlens")
        .unwrap()
        .args(["--quiet", "--no-charts", "--root"])
        .arg(temp_dir.path())
        .assert()
        .success();

    assert!(config.report_path().exists());
    assert!(!config.figures_dir.join("churn_distribution.json").exists());
}

#[test]
fn test_binary_report_requires_cleaned_table() {
    let temp_dir = TempDir::new().unwrap();

    Command::cargo_bin("churnlens")
        .unwrap()
        .args(["--quiet", "--root"])
        .arg(temp_dir.path())
        .arg("report")
        .assert()
        .failure()
        .stderr(predicate::str::contains("churnlens clean"));
}

#[test]
fn test_binary_missing_raw_input_fails() {
    let temp_dir = TempDir::new().unwrap();

    Command::cargo_bin("churnlens")
        .unwrap()
        .args(["--quiet", "--root"])
        .arg(temp_dir.path())
        .arg("clean")
        .assert()
        .failure()
        .stderr(predicate::str::contains("telco_churn.csv"));
}

#[test]
fn test_binary_clean_then_features() {
    let mut raw = create_small_raw_dataframe();
    let (temp_dir, config) = create_project(&mut raw);

    Command::cargo_bin("churnlens")
        .unwrap()
        .args(["--quiet", "--root"])
        .arg(temp_dir.path())
        .arg("clean")
        .assert()
        .success();
    assert!(config.cleaned_data_path.exists());
    assert!(!config.engineered_data_path.exists());

    Command::cargo_bin("churnlens")
        .unwrap()
        .args(["--quiet", "--root"])
        .arg(temp_dir.path())
        .arg("features")
        .assert()
        .success();
    assert!(config.engineered_data_path.exists());
}
