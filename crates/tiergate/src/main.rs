// SPDX-FileCopyrightText: 2026 Tiergate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tiergate - tiered request routing with a fracture-safe governance gate.
//!
//! This is the binary entry point: single-request inspection, mode listing,
//! and the benchmark harness with report output.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod bench;
mod inspect;
mod report;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tiergate_config::TierGateConfig;
use tiergate_core::TierGateError;

use crate::bench::{BenchArgs, DatasetArg};

/// Tiergate - tiered request routing with a fracture-safe governance gate.
#[derive(Parser, Debug)]
#[command(name = "tiergate", version, about, long_about = None)]
struct Cli {
    /// Configuration file to use instead of the standard search path.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a single request and print the decision trace.
    Inspect {
        /// Request text.
        text: String,
        /// Language code (EN or KO).
        #[arg(long, default_value = "EN")]
        lang: String,
        /// Operating mode (overrides engine.mode).
        #[arg(long)]
        mode: Option<String>,
        /// Reference corpus (overrides engine.corpus_path).
        #[arg(long)]
        corpus: Option<PathBuf>,
        /// Print the decision as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List operating modes, their thresholds, and the governance rules.
    Modes {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Replay datasets through every mode and write benchmark reports.
    Bench {
        /// Dataset as NAME=PATH or NAME=PATH:LANG. Repeatable.
        #[arg(long = "dataset", required = true, value_parser = bench::parse_dataset_arg)]
        datasets: Vec<DatasetArg>,
        /// Mode to benchmark. Repeatable; defaults to bench.modes.
        #[arg(long = "mode")]
        modes: Vec<String>,
        /// Cap on samples per mode.
        #[arg(long)]
        max_samples: Option<usize>,
        /// Per-mode wall-clock budget in seconds.
        #[arg(long)]
        deadline_secs: Option<u64>,
        /// Report output directory (overrides bench.output_dir).
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Reference corpus (overrides engine.corpus_path).
        #[arg(long)]
        corpus: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.plain || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let loaded = match &cli.config {
        Some(path) => tiergate_config::load_and_validate_path(path),
        None => tiergate_config::load_and_validate(),
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            tiergate_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.logging.level);

    let result = match cli.command {
        Commands::Inspect {
            text,
            lang,
            mode,
            corpus,
            json,
        } => {
            apply_engine_overrides(&mut config, mode, corpus);
            inspect::run_inspect(&config, &text, &lang, json)
        }
        Commands::Modes { json } => inspect::run_modes(&config, json),
        Commands::Bench {
            datasets,
            modes,
            max_samples,
            deadline_secs,
            output_dir,
            corpus,
        } => {
            apply_engine_overrides(&mut config, None, corpus);
            let args = BenchArgs {
                datasets,
                modes,
                max_samples,
                deadline_secs,
                output_dir,
            };
            bench::run_bench(&config, args)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err @ TierGateError::GovernanceViolation { .. }) => {
            eprintln!("{}: {err}", "governance".red().bold());
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("{}: {err}", "error".red());
            ExitCode::FAILURE
        }
    }
}

fn apply_engine_overrides(config: &mut TierGateConfig, mode: Option<String>, corpus: Option<PathBuf>) {
    if let Some(mode) = mode {
        config.engine.mode = mode;
    }
    if let Some(corpus) = corpus {
        config.engine.corpus_path = Some(corpus.display().to_string());
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tiergate={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Only jemalloc supports advancing the stats epoch.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn inspect_args_parse() {
        let cli = Cli::try_parse_from([
            "tiergate", "inspect", "It is not a cure", "--lang", "KO", "--mode", "aggressive", "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Inspect { text, lang, mode, json, .. } => {
                assert_eq!(text, "It is not a cure");
                assert_eq!(lang, "KO");
                assert_eq!(mode.as_deref(), Some("aggressive"));
                assert!(json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn bench_requires_a_dataset() {
        assert!(Cli::try_parse_from(["tiergate", "bench"]).is_err());
        let cli = Cli::try_parse_from([
            "tiergate", "bench", "--dataset", "ko-neg=/data/ko.jsonl:KO", "--mode", "balanced",
        ])
        .unwrap();
        match cli.command {
            Commands::Bench { datasets, modes, .. } => {
                assert_eq!(datasets.len(), 1);
                assert_eq!(datasets[0].name, "ko-neg");
                assert_eq!(modes, vec!["balanced"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn overrides_replace_engine_settings() {
        let mut config = TierGateConfig::default();
        apply_engine_overrides(&mut config, Some("conservative".into()), Some("/tmp/c.json".into()));
        assert_eq!(config.engine.mode, "conservative");
        assert_eq!(config.engine.corpus_path.as_deref(), Some("/tmp/c.json"));
    }
}
