// SPDX-FileCopyrightText: 2026 Tiergate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the tiergate routing engine.
//!
//! Classification itself has no error path: every text/language pair yields a
//! [`Decision`](crate::Decision). Errors only arise at the edges (mode names,
//! corpus and dataset loading, configuration, report output) and from the
//! benchmark harness when the governance invariant is found broken.

use thiserror::Error;

use crate::types::Mode;

/// The primary error type used across all tiergate crates.
#[derive(Debug, Error)]
pub enum TierGateError {
    /// Unknown operating mode name. A user or configuration error; never retried.
    #[error("invalid mode `{name}`: expected one of conservative, balanced, aggressive")]
    InvalidMode { name: String },

    /// Reference corpus could not be read or parsed. Engines degrade to
    /// fallback-only classification when they see this.
    #[error("corpus load error: {message}")]
    CorpusLoad {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Benchmark dataset could not be read.
    #[error("dataset error: {message}")]
    Dataset {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A benchmark run found fracture decisions routed to MINI.
    #[error("governance violation in {mode} mode: {count} fracture sample(s) routed to MINI")]
    GovernanceViolation { mode: Mode, count: usize },

    /// Benchmark artifacts could not be written.
    #[error("report error: {message}")]
    Report {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration errors that survive validation (e.g. when building an engine).
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
