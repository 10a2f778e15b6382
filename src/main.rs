//! churnlens: Telco customer churn pipeline CLI
//!
//! Runs the cleaning, feature engineering, chart export and reporting
//! stages over the Telco customer export.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use polars::prelude::DataFrame;

use churnlens::cli::{Cli, Commands};
use churnlens::config::PipelineConfig;
use churnlens::pipeline::{
    compute_report_data, estimated_memory_mb, load_cleaned_table, run_cleaning,
    run_feature_engineering,
};
use churnlens::report::{export_charts, render_report, save_report, RunSummary};
use churnlens::utils::{
    create_spinner, finish_with_failure, finish_with_success, print_banner, print_completion,
    print_config, print_count, print_info, print_step_header, print_step_time, print_success,
};

fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Terminal output state shared by every step
struct Console {
    quiet: bool,
    step: u8,
    summary: RunSummary,
}

impl Console {
    fn new(quiet: bool) -> Self {
        Self {
            quiet,
            step: 0,
            summary: RunSummary::new(),
        }
    }

    /// Run one stage under a header and spinner, recording its duration.
    fn step<T>(
        &mut self,
        title: &str,
        working: &str,
        done: &str,
        f: impl FnOnce() -> churnlens::Result<T>,
    ) -> Result<T> {
        self.step += 1;
        if !self.quiet {
            print_step_header(self.step, title);
        }

        let start = Instant::now();
        let spinner = create_spinner(working, self.quiet);
        let value = match f() {
            Ok(value) => value,
            Err(e) => {
                finish_with_failure(&spinner);
                return Err(e).with_context(|| format!("{} failed", title));
            }
        };
        finish_with_success(&spinner, done);

        let elapsed = start.elapsed();
        self.summary.add_step_time(title, elapsed);
        if !self.quiet {
            print_step_time(elapsed);
        }
        Ok(value)
    }

    fn say(&self, f: impl FnOnce()) {
        if !self.quiet {
            f();
        }
    }
}

fn clean(ui: &mut Console, config: &PipelineConfig) -> Result<DataFrame> {
    let outcome = ui.step(
        "Data Cleaning",
        "Loading and cleaning raw data...",
        "Cleaning complete",
        || run_cleaning(config),
    )?;

    ui.say(|| {
        println!("\n    {} Dataset Statistics:", style("✧").cyan());
        println!("      Rows loaded: {}", outcome.rows_loaded);
        println!("      Columns loaded: {}", outcome.columns_loaded);
        println!(
            "      Estimated memory: {:.2} MB",
            estimated_memory_mb(&outcome.table)
        );
        print_count(
            "blank TotalCharges value(s)",
            outcome.imputed_total_charges,
            Some("(filled with 0)"),
        );
        if outcome.duplicates_removed == 0 {
            print_info("No duplicate rows found");
        } else {
            print_count("duplicate row(s)", outcome.duplicates_removed, Some("(removed)"));
        }
        print_success(&format!(
            "Saved cleaned table to {}",
            config.cleaned_data_path.display()
        ));
    });

    ui.summary.record_cleaning(&outcome);
    Ok(outcome.table)
}

fn features(ui: &mut Console, config: &PipelineConfig, cleaned: DataFrame) -> Result<()> {
    let outcome = ui.step(
        "Feature Engineering",
        "Encoding features...",
        "Feature engineering complete",
        || run_feature_engineering(config, cleaned),
    )?;

    ui.say(|| {
        let indicators: usize = outcome.expansions.iter().map(|e| e.indicators.len()).sum();
        print_count(
            "indicator column(s)",
            indicators,
            Some(&format!("(from {} columns)", outcome.expansions.len())),
        );
        print_success(&format!(
            "Saved {} columns to {}",
            outcome.table.width(),
            config.engineered_data_path.display()
        ));
    });

    ui.summary.record_engineering(&outcome);
    Ok(())
}

fn charts(ui: &mut Console, config: &PipelineConfig, cleaned: &DataFrame) -> Result<()> {
    let written = ui.step(
        "Chart Data",
        "Exporting chart data...",
        "Chart data exported",
        || export_charts(cleaned, &config.figures_dir),
    )?;

    ui.say(|| {
        for path in &written {
            print_info(&path.display().to_string());
        }
    });

    ui.summary.set_charts_written(written.len());
    Ok(())
}

fn report(ui: &mut Console, config: &PipelineConfig, cleaned: &DataFrame) -> Result<()> {
    let report_path = config.report_path();
    let data = ui.step(
        "Summary Report",
        "Computing churn aggregates...",
        "Report written",
        || {
            let data = compute_report_data(cleaned)?;
            save_report(&render_report(&data), &report_path)?;
            Ok(data)
        },
    )?;

    ui.say(|| {
        println!(
            "      Overall churn rate: {}",
            style(format!("{:.2}%", data.summary.churn_rate))
                .yellow()
                .bold()
        );
        print_success(&format!("Saved report to {}", report_path.display()));
    });

    ui.summary.set_churn_rate(data.summary.churn_rate);
    Ok(())
}

fn load_cleaned(config: &PipelineConfig) -> Result<DataFrame> {
    load_cleaned_table(config).with_context(|| {
        format!(
            "Failed to load cleaned table from {} (run `churnlens clean` first)",
            config.cleaned_data_path.display()
        )
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let config = cli.config();
    let mut ui = Console::new(cli.quiet);

    ui.say(|| {
        print_banner(env!("CARGO_PKG_VERSION"));
        print_config(&config);
    });

    config
        .ensure_output_dirs()
        .context("Failed to create output directories")?;

    match cli.command() {
        Commands::Run => {
            let cleaned = clean(&mut ui, &config)?;
            features(&mut ui, &config, cleaned.clone())?;
            if !cli.no_charts {
                charts(&mut ui, &config, &cleaned)?;
            }
            report(&mut ui, &config, &cleaned)?;
        }
        Commands::Clean => {
            clean(&mut ui, &config)?;
        }
        Commands::Features => {
            let cleaned = load_cleaned(&config)?;
            features(&mut ui, &config, cleaned)?;
        }
        Commands::Report => {
            let cleaned = load_cleaned(&config)?;
            report(&mut ui, &config, &cleaned)?;
        }
        Commands::Charts => {
            let cleaned = load_cleaned(&config)?;
            charts(&mut ui, &config, &cleaned)?;
        }
    }

    ui.say(|| {
        ui.summary.display();
        print_completion();
    });

    Ok(())
}
