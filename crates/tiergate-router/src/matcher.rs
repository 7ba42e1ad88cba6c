// SPDX-FileCopyrightText: 2026 Tiergate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exact and nearest-neighbour lookup against the reference corpus.

use std::sync::Arc;

use tiergate_core::{Language, MatchKind};
use tracing::debug;

use crate::corpus::{Corpus, ReferenceSample};
use crate::similarity::{normalize_text, NormalizedLevenshtein, Similarity};

/// Minimum similarity for a fuzzy match to be accepted (inclusive).
pub const FUZZY_ACCEPT_THRESHOLD: f64 = 0.72;

/// A corpus sample selected for a request.
#[derive(Debug, Clone, Copy)]
pub struct CorpusMatch<'a> {
    pub sample: &'a ReferenceSample,
    /// Either [`MatchKind::Exact`] or [`MatchKind::Fuzzy`].
    pub kind: MatchKind,
    pub score: f64,
}

/// Looks up requests in a corpus: exact replay first, then fuzzy.
#[derive(Debug, Clone)]
pub struct SimilarityMatcher {
    scorer: Arc<dyn Similarity>,
    threshold: f64,
}

impl Default for SimilarityMatcher {
    fn default() -> Self {
        Self::new(Arc::new(NormalizedLevenshtein))
    }
}

impl SimilarityMatcher {
    pub fn new(scorer: Arc<dyn Similarity>) -> Self {
        Self {
            scorer,
            threshold: FUZZY_ACCEPT_THRESHOLD,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Find the sample a request should replay, if any.
    pub fn find<'a>(
        &self,
        text: &str,
        lang: Language,
        corpus: &'a Corpus,
    ) -> Option<CorpusMatch<'a>> {
        if corpus.is_empty() {
            return None;
        }
        let query = normalize_text(text);
        if query.is_empty() {
            return None;
        }

        if let Some(sample) = corpus
            .samples()
            .iter()
            .find(|s| s.language == lang && s.normalized_text() == query)
        {
            debug!(lang = %lang, tier = %sample.tier, "exact corpus match");
            return Some(CorpusMatch {
                sample,
                kind: MatchKind::Exact,
                score: 1.0,
            });
        }

        self.nearest(&query, lang, corpus)
    }

    fn nearest<'a>(
        &self,
        query: &str,
        lang: Language,
        corpus: &'a Corpus,
    ) -> Option<CorpusMatch<'a>> {
        let same_lang = corpus.samples().iter().any(|s| s.language == lang);
        let mut best: Option<(&ReferenceSample, f64)> = None;

        for sample in corpus.samples() {
            if same_lang && sample.language != lang {
                continue;
            }
            if sample.normalized_text().is_empty() {
                continue;
            }
            let score = self.scorer.score(query, sample.normalized_text());
            // Strict comparison keeps the first-seen maximum.
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((sample, score));
            }
        }

        let (sample, score) = best?;
        if score >= self.threshold {
            debug!(lang = %lang, tier = %sample.tier, score, "fuzzy corpus match");
            Some(CorpusMatch {
                sample,
                kind: MatchKind::Fuzzy,
                score,
            })
        } else {
            debug!(lang = %lang, best_score = score, "no corpus match above threshold");
            None
        }
    }
}
