//! Terminal summary of a pipeline run

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::stages::{CleaningOutcome, EngineeringOutcome};

/// What each stage of a run produced
#[derive(Debug, Default)]
pub struct RunSummary {
    pub rows_loaded: Option<usize>,
    pub columns_loaded: Option<usize>,
    pub imputed_total_charges: Option<usize>,
    pub duplicates_removed: Option<usize>,
    pub cleaned_shape: Option<(usize, usize)>,
    pub engineered_columns: Option<usize>,
    pub churn_rate: Option<f64>,
    pub charts_written: Option<usize>,
    pub step_times: Vec<(String, Duration)>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_cleaning(&mut self, outcome: &CleaningOutcome) {
        self.rows_loaded = Some(outcome.rows_loaded);
        self.columns_loaded = Some(outcome.columns_loaded);
        self.imputed_total_charges = Some(outcome.imputed_total_charges);
        self.duplicates_removed = Some(outcome.duplicates_removed);
        self.cleaned_shape = Some(outcome.table.shape());
    }

    pub fn record_engineering(&mut self, outcome: &EngineeringOutcome) {
        self.engineered_columns = Some(outcome.table.width());
    }

    pub fn set_churn_rate(&mut self, rate: f64) {
        self.churn_rate = Some(rate);
    }

    pub fn set_charts_written(&mut self, count: usize) {
        self.charts_written = Some(count);
    }

    pub fn add_step_time(&mut self, step: &str, elapsed: Duration) {
        self.step_times.push((step.to_string(), elapsed));
    }

    pub fn total_time(&self) -> Duration {
        self.step_times.iter().map(|(_, d)| *d).sum()
    }

    /// Metric rows for the stages that ran
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = Vec::new();
        if let Some(n) = self.rows_loaded {
            rows.push(("📁 Rows Loaded", n.to_string()));
        }
        if let Some(n) = self.columns_loaded {
            rows.push(("📋 Columns Loaded", n.to_string()));
        }
        if let Some(n) = self.imputed_total_charges {
            rows.push(("🩹 Blank TotalCharges Filled", n.to_string()));
        }
        if let Some(n) = self.duplicates_removed {
            rows.push(("🗑️  Duplicates Removed", n.to_string()));
        }
        if let Some((r, c)) = self.cleaned_shape {
            rows.push(("✅ Cleaned Shape", format!("{} x {}", r, c)));
        }
        if let Some(n) = self.engineered_columns {
            rows.push(("🧮 Engineered Columns", n.to_string()));
        }
        if let Some(rate) = self.churn_rate {
            rows.push(("📉 Churn Rate", format!("{:.2}%", rate)));
        }
        if let Some(n) = self.charts_written {
            rows.push(("📊 Charts Exported", n.to_string()));
        }
        rows
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("RUN SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        for (label, value) in self.rows() {
            let cell = match label {
                l if l.contains("Duplicates") && value != "0" => Cell::new(value).fg(Color::Red),
                l if l.contains("Churn Rate") => Cell::new(value)
                    .fg(Color::Yellow)
                    .add_attribute(Attribute::Bold),
                l if l.contains("Cleaned") => Cell::new(value).fg(Color::Green),
                _ => Cell::new(value),
            };
            table.add_row(vec![Cell::new(label), cell]);
        }

        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if !self.step_times.is_empty() {
            println!();
            for (step, elapsed) in &self.step_times {
                println!(
                    "      {:<22} {}",
                    step,
                    style(format!("{:.2}s", elapsed.as_secs_f64())).dim()
                );
            }
            println!(
                "      {:<22} {}",
                style("Total").bold(),
                style(format!("{:.2}s", self.total_time().as_secs_f64())).cyan()
            );
        }
    }
}
