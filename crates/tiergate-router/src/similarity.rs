// SPDX-FileCopyrightText: 2026 Tiergate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text normalization and pluggable string similarity.

/// A similarity function over normalized text.
///
/// Implementations must return a score in `[0, 1]` and `1.0` for identical
/// strings.
pub trait Similarity: Send + Sync + std::fmt::Debug {
    fn score(&self, a: &str, b: &str) -> f64;
}

/// Character-level normalized Levenshtein similarity.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedLevenshtein;

impl Similarity for NormalizedLevenshtein {
    fn score(&self, a: &str, b: &str) -> f64 {
        strsim::normalized_levenshtein(a, b)
    }
}

/// Trim, collapse internal whitespace runs to single spaces, and lowercase.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
