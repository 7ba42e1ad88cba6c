// SPDX-FileCopyrightText: 2026 Tiergate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tiergate bench` command implementation.

use std::path::PathBuf;
use std::time::Duration;

use colored::Colorize;
use tiergate_bench::{load_jsonl, BenchOptions, BenchReport, BenchmarkHarness};
use tiergate_config::model::parse_mode;
use tiergate_config::TierGateConfig;
use tiergate_core::{Language, Tier, TierGateError};
use tiergate_router::RoutingEngine;
use tracing::info;

use crate::report;

/// A `NAME=PATH[:LANG]` dataset argument.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetArg {
    pub name: String,
    pub path: PathBuf,
    pub lang: Option<Language>,
}

/// Parse `NAME=PATH` or `NAME=PATH:LANG`.
///
/// A trailing `:XX` is only taken as a language when it names a supported
/// one, so paths containing colons still work.
pub fn parse_dataset_arg(raw: &str) -> Result<DatasetArg, String> {
    let (name, rest) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=PATH[:LANG], got `{raw}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("dataset name is empty in `{raw}`"));
    }

    let (path, lang) = match rest.rsplit_once(':') {
        Some((path, code)) => match Language::from_code(code) {
            Some(lang) => (path, Some(lang)),
            None => (rest, None),
        },
        None => (rest, None),
    };
    if path.trim().is_empty() {
        return Err(format!("dataset path is empty in `{raw}`"));
    }

    Ok(DatasetArg {
        name: name.to_string(),
        path: PathBuf::from(path),
        lang,
    })
}

/// Command-line settings for one benchmark invocation.
#[derive(Debug)]
pub struct BenchArgs {
    pub datasets: Vec<DatasetArg>,
    pub modes: Vec<String>,
    pub max_samples: Option<usize>,
    pub deadline_secs: Option<u64>,
    pub output_dir: Option<PathBuf>,
}

/// Run the `tiergate bench` command.
///
/// Reports are written before the governance check, so a failing run still
/// leaves its artifacts behind for inspection.
pub fn run_bench(config: &TierGateConfig, args: BenchArgs) -> Result<(), TierGateError> {
    let modes = if args.modes.is_empty() {
        config.bench.modes()?
    } else {
        args.modes
            .iter()
            .map(|m| parse_mode(m))
            .collect::<Result<Vec<_>, _>>()?
    };

    let mut options = BenchOptions::from_config(&config.bench);
    if args.max_samples.is_some() {
        options.max_samples = args.max_samples;
    }
    if let Some(secs) = args.deadline_secs {
        options.deadline = Some(Duration::from_secs(secs));
    }

    let mut samples = Vec::new();
    for dataset in &args.datasets {
        samples.extend(load_jsonl(&dataset.path, &dataset.name, dataset.lang)?);
    }
    info!(datasets = args.datasets.len(), samples = samples.len(), "benchmark input loaded");

    let engine = RoutingEngine::from_config(&config.engine)?;
    let report = BenchmarkHarness::new(engine, options).run(&samples, &modes);

    let output_dir = args
        .output_dir
        .unwrap_or_else(|| PathBuf::from(&config.bench.output_dir));
    let written = report::write_all(&report, &output_dir)?;

    print!("{}", render_table(&report));
    println!("\n  files:");
    for path in &written {
        println!("    {}", path.display());
    }

    report.verify()
}

fn render_table(report: &BenchReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\n  {:<13} {:>16} {:>16} {:>16} {:>9} {:>11} {:>15}\n",
        "mode", "MINI", "STANDARD", "PREMIUM", "savings", "avg ms", "fracture->MINI"
    ));
    out.push_str(&format!("  {}\n", "-".repeat(102)));
    for s in report.summaries() {
        let cell = |tier: Tier| {
            format!(
                "{:>6} ({:>5.1}%)",
                s.route_counts.get(tier),
                s.route_pcts.get(&tier).copied().unwrap_or(0.0)
            )
        };
        let safety = if s.fracture_to_mini_count == 0 {
            "0".green()
        } else {
            s.fracture_to_mini_count.to_string().red().bold()
        };
        out.push_str(&format!(
            "  {:<13} {:>16} {:>16} {:>16} {:>8.1}% {:>11.4} {:>15}\n",
            s.mode.to_string(),
            cell(Tier::Mini),
            cell(Tier::Standard),
            cell(Tier::Premium),
            s.cost_savings_pct,
            s.avg_latency_ms,
            safety
        ));
    }
    out
}
