// SPDX-FileCopyrightText: 2026 Tiergate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test fixtures for tiergate integration tests.
//!
//! Provides deterministic reference corpora and request sets so router and
//! benchmark tests exercise the same data without touching the filesystem.
//!
//! # Components
//!
//! - [`fixtures::corpus_json`] - nested raw corpus with legacy route labels
//! - [`fixtures::REQUESTS`] - request texts covering every feature combination
//! - [`fixtures::request_set`] - a larger set built by cycling [`fixtures::REQUESTS`]

pub mod fixtures;

pub use fixtures::{
    corpus_json, request_set, RequestFixture, FRACTURE_BYPASS_TEXT, KO_SAMPLE_TEXT,
    MINI_SAMPLE_TEXT, PREMIUM_SAMPLE_TEXT, REQUESTS,
};
