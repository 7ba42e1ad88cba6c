// SPDX-FileCopyrightText: 2026 Tiergate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Benchmark harness for the tiergate routing engine.
//!
//! Replays a labeled sample set through one engine per mode and reports tier
//! distribution, cost savings against an all-PREMIUM baseline, latency, and
//! the number of fracture requests that reached MINI (which must be zero).

pub mod dataset;
pub mod harness;

pub use dataset::{load_jsonl, parse_jsonl, BenchSample};
pub use harness::{BenchOptions, BenchReport, BenchmarkHarness, ModeRun, ModeSummary, SampleDetail};
