//! Report rendering for the CLI
//!
//! Text output follows the classic layout:
//!
//! ```text
//! File Type Categorization
//! ==================================================
//! Text (1 files): 27 bytes
//! ```

use crate::audit::{FileRecord, RunReport};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

const RULE_WIDTH: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text report
    #[default]
    Text,
    /// JSON document
    Json,
}

pub fn render(report: &RunReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => render_json(report),
    }
}

pub fn render_text(report: &RunReport) -> String {
    let mut out = String::new();

    section(&mut out, "File Type Categorization");
    for bucket in report.buckets.values() {
        let _ = writeln!(
            out,
            "{} ({} files): {} bytes",
            bucket.category, bucket.file_count, bucket.total_bytes
        );
    }

    section(&mut out, "Files with Unusual Permissions");
    for (n, record) in report.unusual_permissions.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} (Permissions: {})",
            n + 1,
            record.path.display(),
            record.permissions_octal()
        );
    }

    section(&mut out, "Large Files");
    sized_list(&mut out, &report.large_files);

    section(&mut out, "Other Extensions");
    sized_list(&mut out, &report.unknown_extensions);

    let groups = report.unknown_by_extension();
    if !groups.is_empty() {
        let summary: Vec<String> = groups
            .iter()
            .map(|(ext, files)| {
                let ext = if ext.is_empty() { "(none)" } else { ext };
                format!("{} ({})", ext, files.len())
            })
            .collect();
        let _ = writeln!(out, "Extensions: {}", summary.join(", "));
    }

    out
}

pub fn render_json(report: &RunReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report")
}

/// One-line run summary for the status output
pub fn summary_line(report: &RunReport) -> String {
    let stats = &report.stats;
    format!(
        "Analyzed {} files ({} skipped) in {} directories in {:.2}s using {} workers",
        stats.files_probed,
        stats.files_skipped(),
        stats.directories,
        stats.duration_ms as f64 / 1000.0,
        stats.workers
    )
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}\n{}", title, "=".repeat(RULE_WIDTH));
}

fn sized_list(out: &mut String, records: &[FileRecord]) {
    for (n, record) in records.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} ({} bytes)",
            n + 1,
            record.path.display(),
            record.size_bytes
        );
    }
}
