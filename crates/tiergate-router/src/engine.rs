// SPDX-FileCopyrightText: 2026 Tiergate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The routing decision engine.
//!
//! Orchestrates one classification: empty input > exact replay > fuzzy
//! replay > rule-based fallback, with governance applied to whichever path
//! produced the candidate.

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use tiergate_config::model::EngineConfig;
use tiergate_core::{Decision, GovernanceAction, Language, MatchKind, Mode, Tier, TierGateError};
use tracing::{debug, info, warn};

use crate::classifier::{empty_decision, FallbackClassifier, Features};
use crate::corpus::{load_corpus_file, Corpus, RawValue};
use crate::governance;
use crate::matcher::{CorpusMatch, SimilarityMatcher};
use crate::mode::{describe, ModeDescription};
use crate::similarity::Similarity;

/// Classifies requests into tiers under a switchable operating mode.
///
/// The corpus is shared read-only, so one engine can serve many threads.
/// Callers that need a fixed mode per request should prefer
/// [`classify_with_mode`](Self::classify_with_mode) over [`set_mode`](Self::set_mode).
#[derive(Debug)]
pub struct RoutingEngine {
    corpus: Arc<Corpus>,
    matcher: SimilarityMatcher,
    classifier: FallbackClassifier,
    mode: RwLock<Mode>,
}

impl RoutingEngine {
    pub fn new(corpus: impl Into<Arc<Corpus>>, mode: Mode) -> Self {
        Self {
            corpus: corpus.into(),
            matcher: SimilarityMatcher::default(),
            classifier: FallbackClassifier::default(),
            mode: RwLock::new(mode),
        }
    }

    /// Build an engine from an optional raw corpus tree.
    ///
    /// A tree that fails to load leaves the engine running on the fallback
    /// classifier alone.
    pub fn from_source(source: Option<&RawValue>, mode: Mode) -> Self {
        let corpus = match source.map(Corpus::from_raw) {
            None => Corpus::empty(),
            Some(Ok(corpus)) => corpus,
            Some(Err(err)) => {
                warn!(error = %err, "reference corpus unavailable, using fallback classifier only");
                Corpus::empty()
            }
        };
        Self::new(corpus, mode)
    }

    /// Build an engine from the `[engine]` configuration section.
    ///
    /// Only an invalid mode is an error; an unreadable corpus degrades to
    /// fallback-only classification.
    pub fn from_config(config: &EngineConfig) -> Result<Self, TierGateError> {
        let mode = config.mode()?;
        let corpus = match config.corpus_path.as_deref() {
            None => Corpus::empty(),
            Some(path) => load_corpus_file(Path::new(path)).unwrap_or_else(|err| {
                warn!(path, error = %err, "reference corpus unavailable, using fallback classifier only");
                Corpus::empty()
            }),
        };
        Ok(Self::new(corpus, mode).with_fracture_tier(config.fracture_tier))
    }

    /// Replace the similarity scorer used for fuzzy matching.
    pub fn with_similarity(mut self, scorer: Arc<dyn Similarity>) -> Self {
        self.matcher = SimilarityMatcher::new(scorer);
        self
    }

    /// Set the tier the fallback classifier assigns to fractures.
    pub fn with_fracture_tier(mut self, tier: Tier) -> Self {
        self.classifier = FallbackClassifier::new(tier);
        self
    }

    /// A new engine bound to `mode` that shares this engine's corpus and scorer.
    pub fn rebind(&self, mode: Mode) -> Self {
        Self {
            corpus: Arc::clone(&self.corpus),
            matcher: self.matcher.clone(),
            classifier: self.classifier,
            mode: RwLock::new(mode),
        }
    }

    pub fn corpus(&self) -> &Arc<Corpus> {
        &self.corpus
    }

    /// The current operating mode.
    pub fn mode(&self) -> Mode {
        *self.mode.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Switch the operating mode by name. An unknown name leaves the mode unchanged.
    pub fn set_mode(&self, name: &str) -> Result<(), TierGateError> {
        let next = Mode::from_name(name)?;
        let mut cell = self.mode.write().unwrap_or_else(PoisonError::into_inner);
        let previous = *cell;
        *cell = next;
        info!(from = %previous, to = %next, "routing mode changed");
        Ok(())
    }

    /// Describe the current mode, its thresholds, and the alternatives.
    pub fn describe_mode(&self) -> ModeDescription {
        describe(self.mode())
    }

    /// Classify a request under the current mode.
    ///
    /// `lang` is a language code such as `"EN"` or `"ko"`. Unrecognized codes
    /// skip corpus lookup and go straight to the fallback classifier.
    pub fn classify(&self, text: &str, lang: &str) -> Decision {
        self.classify_with_mode(text, lang, self.mode())
    }

    /// Classify a request under an explicit mode, ignoring the engine's current mode.
    pub fn classify_with_mode(&self, text: &str, lang: &str, mode: Mode) -> Decision {
        let candidate = self.candidate(text, lang, mode);
        governance::enforce(candidate, mode)
    }

    fn candidate(&self, text: &str, lang: &str, mode: Mode) -> Decision {
        if text.trim().is_empty() {
            return empty_decision(mode);
        }

        match Language::from_code(lang) {
            Some(language) => {
                if let Some(found) = self.matcher.find(text, language, &self.corpus) {
                    return replay(&found, text, mode);
                }
            }
            None => debug!(lang, "unrecognized language code, skipping corpus lookup"),
        }

        self.classifier.classify(text, mode)
    }
}

/// Turn a corpus match into a decision carrying the sample's labels.
fn replay(found: &CorpusMatch<'_>, text: &str, mode: Mode) -> Decision {
    let sample = found.sample;
    let features = Features::extract(text);
    Decision {
        tier: sample.tier,
        risk_state: sample.risk_state,
        need_score: sample
            .need_score
            .unwrap_or_else(|| features.base_need())
            .clamp(0.0, 1.0),
        is_fracture: sample.risk_state.is_fracture(),
        short_signal_cap_applied: false,
        high_stakes: features.high_stakes,
        match_kind: found.kind,
        mode,
        stability_score: sample.stability_score,
        tension_score: sample.tension_score,
        shape: sample.shape,
        similarity: Some(found.score),
        nearest_text: (found.kind == MatchKind::Fuzzy).then(|| sample.text.clone()),
        notes: sample.notes.clone(),
        governance: GovernanceAction::Unchanged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tiergate_core::{MatchKind, RiskState};
    use tracing_test::traced_test;

    use crate::corpus::ReferenceSample;

    fn engine(mode: Mode) -> RoutingEngine {
        RoutingEngine::new(
            Corpus::from_samples(vec![
                ReferenceSample::new("Order more printer paper", Language::En, Tier::Mini, RiskState::Harmony),
                ReferenceSample::new("Draft the merger agreement", Language::En, Tier::Premium, RiskState::Alignment),
            ]),
            mode,
        )
    }

    fn too_deep() -> RawValue {
        (0..=crate::corpus::MAX_DEPTH + 1).fold(RawValue::Object(BTreeMap::new()), |inner, _| {
            RawValue::Array(vec![inner])
        })
    }

    #[test]
    fn engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RoutingEngine>();
    }

    #[test]
    fn exact_replay_uses_sample_labels() {
        let d = engine(Mode::Balanced).classify("order more PRINTER paper", "EN");
        assert_eq!(d.match_kind, MatchKind::Exact);
        assert_eq!(d.tier, Tier::Mini);
        assert_eq!(d.similarity, Some(1.0));
    }

    #[test]
    fn conservative_lifts_replayed_mini() {
        let d = engine(Mode::Conservative).classify("Order more printer paper", "EN");
        assert_eq!(d.match_kind, MatchKind::Exact);
        assert_eq!(d.tier, Tier::Standard);
        assert_eq!(d.governance, GovernanceAction::ConservativeFloor);
    }

    #[test]
    fn unknown_language_goes_to_fallback() {
        let d = engine(Mode::Balanced).classify("Order more printer paper", "JA");
        assert_eq!(d.match_kind, MatchKind::Fallback);
    }

    #[test]
    fn empty_input_short_circuits() {
        let d = engine(Mode::Conservative).classify("", "EN");
        assert_eq!(d.match_kind, MatchKind::Empty);
        assert_eq!(d.tier, Tier::Mini);
        assert_eq!(d.mode, Mode::Conservative);
    }

    #[test]
    fn set_mode_switches_and_rejects_unknown_names() {
        let engine = engine(Mode::Balanced);
        engine.set_mode("aggressive").unwrap();
        assert_eq!(engine.mode(), Mode::Aggressive);

        let err = engine.set_mode("reckless").unwrap_err();
        assert!(matches!(err, TierGateError::InvalidMode { .. }));
        assert_eq!(engine.mode(), Mode::Aggressive);
    }

    #[test]
    fn fuzzy_replay_carries_the_nearest_sample_text() {
        let engine = engine(Mode::Balanced);
        let fuzzy = engine.classify("Order more printer papers", "EN");
        assert_eq!(fuzzy.match_kind, MatchKind::Fuzzy);
        assert_eq!(fuzzy.nearest_text.as_deref(), Some("Order more printer paper"));

        let exact = engine.classify("Order more printer paper", "EN");
        assert_eq!(exact.match_kind, MatchKind::Exact);
        assert!(exact.nearest_text.is_none());
    }

    #[test]
    fn set_mode_requires_exact_lowercase_names() {
        let engine = engine(Mode::Balanced);
        for name in ["Aggressive", " balanced", "CONSERVATIVE"] {
            let err = engine.set_mode(name).unwrap_err();
            assert!(matches!(err, TierGateError::InvalidMode { name: ref n } if n == name));
        }
        assert_eq!(engine.mode(), Mode::Balanced);
    }

    #[test]
    fn classify_with_mode_ignores_engine_mode() {
        let engine = engine(Mode::Aggressive);
        let d = engine.classify_with_mode("hi", "EN", Mode::Conservative);
        assert_eq!(d.mode, Mode::Conservative);
        assert_eq!(d.tier, Tier::Standard);
        assert_eq!(engine.mode(), Mode::Aggressive);
    }

    #[test]
    fn rebind_shares_the_corpus() {
        let base = engine(Mode::Balanced);
        let other = base.rebind(Mode::Conservative);
        assert!(Arc::ptr_eq(base.corpus(), other.corpus()));
        assert_eq!(other.mode(), Mode::Conservative);
        assert_eq!(base.mode(), Mode::Balanced);
    }

    #[test]
    fn describe_mode_reports_current_thresholds() {
        let engine = engine(Mode::Conservative);
        let d = engine.describe_mode();
        assert_eq!(d.mode, Mode::Conservative);
        assert_eq!(d.thresholds.mini_base, 0.05);
    }

    #[test]
    fn from_config_applies_mode_and_fracture_tier() {
        let config = EngineConfig {
            mode: "aggressive".into(),
            corpus_path: None,
            fracture_tier: Tier::Standard,
        };
        let engine = RoutingEngine::from_config(&config).unwrap();
        assert_eq!(engine.mode(), Mode::Aggressive);
        assert!(engine.corpus().is_empty());
        let d = engine.classify("It is not a cure", "EN");
        assert_eq!(d.tier, Tier::Standard);
    }

    #[test]
    fn from_config_rejects_unknown_mode() {
        let config = EngineConfig {
            mode: "turbo".into(),
            ..EngineConfig::default()
        };
        assert!(RoutingEngine::from_config(&config).is_err());
    }

    #[test]
    #[traced_test]
    fn malformed_source_degrades_to_fallback() {
        let engine = RoutingEngine::from_source(Some(&too_deep()), Mode::Balanced);
        assert!(engine.corpus().is_empty());
        assert!(logs_contain("reference corpus unavailable"));

        let d = engine.classify("hi", "EN");
        assert_eq!(d.match_kind, MatchKind::Fallback);
    }

    #[test]
    #[traced_test]
    fn missing_corpus_file_degrades_to_fallback() {
        let config = EngineConfig {
            corpus_path: Some("/nonexistent/tiergate/corpus.json".into()),
            ..EngineConfig::default()
        };
        let engine = RoutingEngine::from_config(&config).unwrap();
        assert!(engine.corpus().is_empty());
        assert!(logs_contain("reference corpus unavailable"));
    }

    #[test]
    #[traced_test]
    fn mode_switch_is_logged() {
        engine(Mode::Balanced).set_mode("conservative").unwrap();
        assert!(logs_contain("routing mode changed"));
    }
}
