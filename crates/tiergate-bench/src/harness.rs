// SPDX-FileCopyrightText: 2026 Tiergate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-mode replay of a sample set with cost and governance accounting.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tiergate_config::model::BenchConfig;
use tiergate_core::{MatchKind, Mode, RiskState, Tier, TierGateError};
use tiergate_cost::{cost_savings_pct, TierCounts};
use tiergate_router::RoutingEngine;
use tracing::{error, info};

use crate::dataset::BenchSample;

/// Limits applied to each mode's run.
#[derive(Debug, Clone, Copy, Default)]
pub struct BenchOptions {
    /// Classify at most this many samples per mode.
    pub max_samples: Option<usize>,
    /// Stop classifying once a mode has run this long.
    pub deadline: Option<Duration>,
}

impl BenchOptions {
    pub fn from_config(config: &BenchConfig) -> Self {
        Self {
            max_samples: config.max_samples,
            deadline: config.deadline_secs.map(Duration::from_secs),
        }
    }
}

/// Outcome of classifying one sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleDetail {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
    pub lang: String,
    pub route: Tier,
    pub latency_ms: f64,
    pub is_fracture: bool,
    pub risk_state: RiskState,
    pub match_kind: MatchKind,
    pub need_score: f64,
    pub short_signal_cap_applied: bool,
    pub high_stakes: bool,
}

/// Aggregate statistics for one mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeSummary {
    pub mode: Mode,
    pub total_samples: usize,
    pub route_counts: TierCounts,
    pub route_pcts: BTreeMap<Tier, f64>,
    pub cost_savings_pct: f64,
    pub avg_latency_ms: f64,
    pub total_time_sec: f64,
    pub fracture_count: usize,
    /// Fracture samples routed to MINI. Anything but zero is a governance failure.
    pub fracture_to_mini_count: usize,
    /// Whether the sample cap or deadline cut the run short.
    pub truncated: bool,
}

/// Summary plus per-sample details, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeRun {
    pub summary: ModeSummary,
    pub details: Vec<SampleDetail>,
}

/// Results for every benchmarked mode, in the order the modes were requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchReport {
    pub runs: Vec<ModeRun>,
}

impl BenchReport {
    pub fn run(&self, mode: Mode) -> Option<&ModeRun> {
        self.runs.iter().find(|r| r.summary.mode == mode)
    }

    pub fn summaries(&self) -> impl Iterator<Item = &ModeSummary> {
        self.runs.iter().map(|r| &r.summary)
    }

    /// Check the fracture invariant across every mode.
    ///
    /// Each offending mode is logged; the first one is returned as the error.
    pub fn verify(&self) -> Result<(), TierGateError> {
        let mut first = None;
        for summary in self.summaries() {
            if summary.fracture_to_mini_count > 0 {
                error!(
                    mode = %summary.mode,
                    count = summary.fracture_to_mini_count,
                    "governance violation: fracture requests routed to MINI"
                );
                if first.is_none() {
                    first = Some(TierGateError::GovernanceViolation {
                        mode: summary.mode,
                        count: summary.fracture_to_mini_count,
                    });
                }
            }
        }
        first.map_or(Ok(()), Err)
    }
}

/// Replays samples through fresh engines that share one corpus.
#[derive(Debug)]
pub struct BenchmarkHarness {
    engine: RoutingEngine,
    options: BenchOptions,
}

impl BenchmarkHarness {
    /// `engine` supplies the corpus and scorer; its own mode is not used.
    pub fn new(engine: RoutingEngine, options: BenchOptions) -> Self {
        Self { engine, options }
    }

    /// Benchmark every mode in `modes`, in parallel across modes.
    pub fn run(&self, samples: &[BenchSample], modes: &[Mode]) -> BenchReport {
        let runs = modes
            .par_iter()
            .map(|mode| self.run_mode(samples, *mode))
            .collect();
        BenchReport { runs }
    }

    fn run_mode(&self, samples: &[BenchSample], mode: Mode) -> ModeRun {
        let engine = self.engine.rebind(mode);
        let limit = self.options.max_samples.unwrap_or(usize::MAX);
        let mut truncated = samples.len() > limit;

        let started = Instant::now();
        let mut details = Vec::with_capacity(samples.len().min(limit));
        for sample in samples.iter().take(limit) {
            if let Some(deadline) = self.options.deadline
                && started.elapsed() >= deadline
            {
                truncated = true;
                break;
            }

            let t0 = Instant::now();
            let decision = engine.classify(&sample.text, &sample.lang);
            let latency_ms = t0.elapsed().as_secs_f64() * 1000.0;

            details.push(SampleDetail {
                id: sample.id.clone(),
                dataset: sample.dataset.clone(),
                lang: sample.lang.clone(),
                route: decision.tier,
                latency_ms,
                is_fracture: decision.is_fracture,
                risk_state: decision.risk_state,
                match_kind: decision.match_kind,
                need_score: decision.need_score,
                short_signal_cap_applied: decision.short_signal_cap_applied,
                high_stakes: decision.high_stakes,
            });
        }
        let total_time_sec = started.elapsed().as_secs_f64();

        let summary = summarize(mode, &details, total_time_sec, truncated);
        info!(
            mode = %mode,
            samples = summary.total_samples,
            cost_savings_pct = summary.cost_savings_pct,
            fracture_count = summary.fracture_count,
            fracture_to_mini = summary.fracture_to_mini_count,
            truncated,
            "benchmark mode complete"
        );
        ModeRun { summary, details }
    }
}

fn summarize(mode: Mode, details: &[SampleDetail], total_time_sec: f64, truncated: bool) -> ModeSummary {
    let route_counts: TierCounts = details.iter().map(|d| d.route).collect();
    let route_pcts = Tier::ALL
        .iter()
        .map(|t| (*t, route_counts.share_pct(*t)))
        .collect();
    let avg_latency_ms = if details.is_empty() {
        0.0
    } else {
        details.iter().map(|d| d.latency_ms).sum::<f64>() / details.len() as f64
    };
    let fracture_count = details.iter().filter(|d| d.is_fracture).count();
    let fracture_to_mini_count = details
        .iter()
        .filter(|d| d.is_fracture && d.route == Tier::Mini)
        .count();

    ModeSummary {
        mode,
        total_samples: details.len(),
        route_counts,
        route_pcts,
        cost_savings_pct: cost_savings_pct(&route_counts),
        avg_latency_ms,
        total_time_sec,
        fracture_count,
        fracture_to_mini_count,
        truncated,
    }
}
