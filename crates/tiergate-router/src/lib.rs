// SPDX-FileCopyrightText: 2026 Tiergate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tiered routing decisions for the tiergate engine.
//!
//! This crate provides:
//! - [`Corpus`]: flattened, governance-corrected reference samples
//! - [`SimilarityMatcher`]: exact and fuzzy replay of corpus samples
//! - [`FallbackClassifier`]: keyword rules for requests the corpus cannot answer
//! - [`governance::enforce`]: the final gate keeping fractures out of MINI
//! - [`RoutingEngine`]: the mode-aware orchestrator tying them together
//!
//! Classification never performs I/O and never fails.

pub mod classifier;
pub mod corpus;
pub mod engine;
pub mod governance;
pub mod matcher;
pub mod mode;
pub mod similarity;

pub use classifier::{FallbackClassifier, Features};
pub use corpus::{load_corpus_file, parse_corpus_str, Corpus, LoadStats, RawValue, ReferenceSample};
pub use engine::RoutingEngine;
pub use matcher::{CorpusMatch, SimilarityMatcher, FUZZY_ACCEPT_THRESHOLD};
pub use mode::{describe, ModeDescription, Thresholds};
pub use similarity::{normalize_text, NormalizedLevenshtein, Similarity};
