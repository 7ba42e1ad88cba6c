// SPDX-FileCopyrightText: 2026 Tiergate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Benchmark artifact writers.
//!
//! Per mode: `benchmark_{mode}_summary.json` and `benchmark_{mode}_details.jsonl`.
//! Across modes: `benchmark_report.md`.

use std::fmt::Write as _;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tiergate_bench::{BenchReport, ModeRun, ModeSummary};
use tiergate_core::{Tier, TierGateError};
use tiergate_cost::tier_weight;
use tracing::debug;

#[derive(Serialize)]
struct SummaryFile<'a> {
    timestamp: String,
    #[serde(flatten)]
    summary: &'a ModeSummary,
}

fn report_err(path: &Path, e: impl std::error::Error + Send + Sync + 'static) -> TierGateError {
    TierGateError::Report {
        message: format!("failed to write {}", path.display()),
        source: Some(Box::new(e)),
    }
}

/// Write every artifact for `report` into `dir`, creating it if needed.
pub fn write_all(report: &BenchReport, dir: &Path) -> Result<Vec<PathBuf>, TierGateError> {
    fs::create_dir_all(dir).map_err(|e| report_err(dir, e))?;
    let timestamp = chrono::Local::now().to_rfc3339();

    let mut written = Vec::new();
    for run in &report.runs {
        written.push(write_summary(run, dir, &timestamp)?);
        written.push(write_details(run, dir)?);
    }
    written.push(write_markdown(report, dir, &timestamp)?);
    Ok(written)
}

fn write_summary(run: &ModeRun, dir: &Path, timestamp: &str) -> Result<PathBuf, TierGateError> {
    let path = dir.join(format!("benchmark_{}_summary.json", run.summary.mode));
    let file = SummaryFile {
        timestamp: timestamp.to_string(),
        summary: &run.summary,
    };
    let body = serde_json::to_string_pretty(&file).map_err(|e| report_err(&path, e))?;
    fs::write(&path, body).map_err(|e| report_err(&path, e))?;
    debug!(path = %path.display(), "summary written");
    Ok(path)
}

fn write_details(run: &ModeRun, dir: &Path) -> Result<PathBuf, TierGateError> {
    let path = dir.join(format!("benchmark_{}_details.jsonl", run.summary.mode));
    let file = fs::File::create(&path).map_err(|e| report_err(&path, e))?;
    let mut out = BufWriter::new(file);
    for detail in &run.details {
        serde_json::to_writer(&mut out, detail).map_err(|e| report_err(&path, e))?;
        out.write_all(b"\n").map_err(|e| report_err(&path, e))?;
    }
    out.flush().map_err(|e| report_err(&path, e))?;
    debug!(path = %path.display(), lines = run.details.len(), "details written");
    Ok(path)
}

fn write_markdown(report: &BenchReport, dir: &Path, timestamp: &str) -> Result<PathBuf, TierGateError> {
    let path = dir.join("benchmark_report.md");
    fs::write(&path, render_markdown(report, timestamp)).map_err(|e| report_err(&path, e))?;
    Ok(path)
}

/// Render the cross-mode Markdown report.
pub fn render_markdown(report: &BenchReport, timestamp: &str) -> String {
    let mut md = String::new();
    let samples = report.summaries().map(|s| s.total_samples).max().unwrap_or(0);

    // Writing to a String cannot fail.
    let _ = writeln!(md, "# Tiergate benchmark report\n");
    let _ = writeln!(md, "**Generated**: {timestamp}  ");
    let _ = writeln!(md, "**Samples per mode**: {samples}  ");
    let _ = writeln!(
        md,
        "**Cost weights**: MINI {}, STANDARD {}, PREMIUM {}\n",
        tier_weight(Tier::Mini),
        tier_weight(Tier::Standard),
        tier_weight(Tier::Premium)
    );

    let _ = writeln!(md, "## Results by mode\n");
    let _ = writeln!(
        md,
        "| Mode | MINI | STANDARD | PREMIUM | Cost savings | Avg latency | Fracture->MINI |"
    );
    let _ = writeln!(md, "|------|------|----------|---------|--------------|-------------|----------------|");
    for s in report.summaries() {
        let cell = |tier: Tier| {
            format!(
                "{} ({:.1}%)",
                s.route_counts.get(tier),
                s.route_pcts.get(&tier).copied().unwrap_or(0.0)
            )
        };
        let _ = writeln!(
            md,
            "| **{}** | {} | {} | {} | {:.1}% | {:.3}ms | {} |",
            s.mode.to_string().to_uppercase(),
            cell(Tier::Mini),
            cell(Tier::Standard),
            cell(Tier::Premium),
            s.cost_savings_pct,
            s.avg_latency_ms,
            s.fracture_to_mini_count
        );
    }

    let _ = writeln!(md, "\n## Governance\n");
    let _ = writeln!(md, "| Mode | Fracture samples | Fracture->MINI | Check |");
    let _ = writeln!(md, "|------|------------------|----------------|-------|");
    for s in report.summaries() {
        let check = if s.fracture_to_mini_count == 0 { "PASS" } else { "FAIL" };
        let _ = writeln!(
            md,
            "| {} | {} | {} | {check} |",
            s.mode.to_string().to_uppercase(),
            s.fracture_count,
            s.fracture_to_mini_count
        );
    }

    let truncated: Vec<String> = report
        .summaries()
        .filter(|s| s.truncated)
        .map(|s| s.mode.to_string())
        .collect();
    if !truncated.is_empty() {
        let _ = writeln!(
            md,
            "\nRuns cut short by the sample cap or deadline: {}.",
            truncated.join(", ")
        );
    }

    let _ = writeln!(md, "\n## Summary\n");
    for s in report.summaries() {
        let _ = writeln!(
            md,
            "- **{}**: {:.1}% cost savings, {:.1}% routed to MINI",
            s.mode.to_string().to_uppercase(),
            s.cost_savings_pct,
            s.route_pcts.get(&Tier::Mini).copied().unwrap_or(0.0)
        );
    }
    md
}
