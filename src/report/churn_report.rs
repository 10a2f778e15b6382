//! Plain-text churn summary report

use std::path::Path;

use comfy_table::{presets::ASCII_FULL, CellAlignment, Table};
use tracing::info;

use crate::error::Result;
use crate::pipeline::aggregate::{ChurnBreakdown, DatasetSummary, TopSegment};
use crate::pipeline::columns::{CONTRACT, INTERNET_SERVICE, PAYMENT_METHOD};
use crate::pipeline::stages::ReportData;
use crate::pipeline::writer::write_text;

const RULE_WIDTH: usize = 42;

/// Human-readable label for a grouping column
pub fn display_label(column: &str) -> &str {
    match column {
        CONTRACT => "Contract",
        INTERNET_SERVICE => "Internet Service",
        PAYMENT_METHOD => "Payment Method",
        other => other,
    }
}

/// Integer with comma thousands separators: 7043 -> "7,043"
pub fn format_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Dollar amount with two decimals and thousands separators
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{}${}.{:02}",
        sign,
        format_thousands((cents / 100) as usize),
        cents % 100
    )
}

/// "Highest churn segments:" followed by one line per segment.
pub fn format_top_segments(segments: &[TopSegment]) -> String {
    let mut lines = vec!["Highest churn segments:".to_string()];
    for segment in segments {
        lines.push(format!(
            "  - {}: {} ({:.2}% churn rate)",
            display_label(&segment.column),
            segment.category,
            segment.churn_rate
        ));
    }
    lines.join("\n")
}

/// Render a breakdown as an ASCII table
pub fn format_breakdown(breakdown: &ChurnBreakdown) -> String {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec![breakdown.column.as_str(), "total", "churned", "churn_rate"]);

    for entry in &breakdown.categories {
        table.add_row(vec![
            entry.category.clone(),
            format_thousands(entry.total),
            format_thousands(entry.churned),
            format!("{:.2}", entry.churn_rate),
        ]);
    }
    for idx in 1..4 {
        if let Some(column) = table.column_mut(idx) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    table.to_string()
}

fn section(out: &mut String, title: &str) {
    out.push('\n');
    out.push_str(title);
    out.push('\n');
    out.push_str(&"-".repeat(title.len()));
    out.push('\n');
}

fn overview_line(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!("{:<20}: {}\n", label, value));
}

/// Assemble the full report text.
pub fn format_report(
    summary: &DatasetSummary,
    by_contract: &ChurnBreakdown,
    by_internet: &ChurnBreakdown,
    top_segments: &str,
) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push_str(&rule);
    out.push('\n');
    out.push_str("TELCO CUSTOMER CHURN - SUMMARY REPORT\n");
    out.push_str(&rule);
    out.push('\n');

    section(&mut out, "1. DATASET OVERVIEW");
    overview_line(
        &mut out,
        "Total Customers",
        &format_thousands(summary.total_customers),
    );
    overview_line(
        &mut out,
        "Total Features",
        &format_thousands(summary.total_features),
    );
    overview_line(
        &mut out,
        "Churned Customers",
        &format_thousands(summary.churned_count),
    );
    overview_line(
        &mut out,
        "Retained Customers",
        &format_thousands(summary.retained_count),
    );
    overview_line(
        &mut out,
        "Overall Churn Rate",
        &format!("{:.2}%", summary.churn_rate),
    );
    overview_line(
        &mut out,
        "Avg Monthly Charges",
        &format_currency(summary.avg_monthly_charges),
    );
    overview_line(
        &mut out,
        "Avg Customer Tenure",
        &format!("{:.1} months", summary.avg_tenure),
    );

    section(&mut out, "2. CHURN BY CONTRACT TYPE");
    out.push_str(&format_breakdown(by_contract));
    out.push('\n');

    section(&mut out, "3. CHURN BY INTERNET SERVICE");
    out.push_str(&format_breakdown(by_internet));
    out.push('\n');

    section(&mut out, "4. KEY FINDINGS");
    out.push_str(top_segments);
    out.push('\n');

    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    out
}

/// Report text for precomputed aggregates
pub fn render_report(data: &ReportData) -> String {
    format_report(
        &data.summary,
        &data.churn_by_contract,
        &data.churn_by_internet,
        &format_top_segments(&data.top_segments),
    )
}

/// Write the report, replacing any previous one.
pub fn save_report(report: &str, path: &Path) -> Result<()> {
    write_text(path, report)?;
    info!(path = %path.display(), bytes = report.len(), "saved report");
    Ok(())
}
