//! Collection statistics and dashboard views.
//!
//! Renders the [`AnalyticsReport`] for a record file: totals, file types by
//! size, the top projects, contractors, and description words, and the
//! files-modified-per-day timeline. Used by `docmeta stats`.

use anyhow::Result;
use std::fmt::Write as _;
use std::path::Path;
use tracing::debug;

use docmeta_core::analytics::{build_report, AnalyticsReport, ReportView};

use crate::config::Config;
use crate::records;

/// Run the stats command: load records and print the report.
pub fn run_stats(config: &Config, input: &Path, query: Option<&str>, json: bool) -> Result<()> {
    let records = records::load_corpus(input)?.filtered(query).records();
    let report = build_report(&records, &config.report_options());
    debug!(
        files = report.total_files,
        bytes = report.total_size,
        "built report"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}

/// Plain-text rendering of a report.
pub fn render_report(report: &AnalyticsReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Document Metadata Report");
    let _ = writeln!(out, "========================");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  Total size:  {} ({} bytes)",
        human_size(report.total_size),
        group_thousands(report.total_size)
    );
    let _ = writeln!(out, "  Total files: {}", report.total_files);

    for view in report.views() {
        let _ = writeln!(out);
        render_view(&mut out, view);
    }
    out
}

fn render_view(out: &mut String, view: &ReportView) {
    let _ = writeln!(out, "  {}:", view.title);
    if view.is_empty() {
        let _ = writeln!(out, "    (no data)");
        return;
    }

    let width = view
        .entries
        .iter()
        .map(|e| e.label.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(12, 48);
    let _ = writeln!(out, "    {:<width$} {:>14}", "LABEL", view.measure.to_uppercase());
    let _ = writeln!(out, "    {}", "-".repeat(width + 15));
    for entry in &view.entries {
        let _ = writeln!(
            out,
            "    {:<width$} {:>14}",
            entry.label,
            group_thousands(entry.value)
        );
    }
}

/// Format a byte count with binary units and one decimal, e.g. `1.5 KB`.
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// Format an integer with `,` thousands separators.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
