// SPDX-FileCopyrightText: 2026 Tiergate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rule-based fallback classification.
//!
//! Used whenever the corpus has nothing close enough to replay. Keyword rules
//! cover English and Korean; every check is a case-insensitive substring test.

use tiergate_core::{Decision, GovernanceAction, MatchKind, Mode, RiskState, Shape, Tier};
use tracing::debug;

use crate::mode::Thresholds;

/// Absolute or dangerous claims.
const RISKY_CLAIM: &[&str] = &[
    "100%", "guarantee", "cure", "always", "never", "perfect", "kill", "죽", "법적", "소송",
];

/// Negation markers. `"no "` keeps its trailing space so words like "note" do not match.
const NEGATION: &[&str] = &["not", "never", "no ", "아니다", "않", "못", "없"];

/// Legal, medical, and financial vocabulary.
const HIGH_STAKES: &[&str] = &[
    "law", "medical", "financial", "contract", "법", "의료", "금융", "계약",
];

/// Requests shorter than this (in characters) may take the short-signal cap.
const SHORT_SIGNAL_CHARS: usize = 30;

/// Need floor applied to fracture decisions.
const FRACTURE_NEED_FLOOR: f64 = 0.65;

/// Surface features extracted from request text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Features {
    pub has_numbers: bool,
    pub risky_claim: bool,
    pub negation: bool,
    pub high_stakes: bool,
}

impl Features {
    pub fn extract(text: &str) -> Self {
        let lower = text.to_lowercase();
        let any = |words: &[&str]| words.iter().any(|w| lower.contains(w));
        Self {
            has_numbers: text.chars().any(char::is_numeric),
            risky_claim: any(RISKY_CLAIM),
            negation: any(NEGATION),
            high_stakes: any(HIGH_STAKES),
        }
    }

    /// Negation combined with a risky claim.
    pub fn is_fracture(&self) -> bool {
        self.negation && self.risky_claim
    }

    pub fn risk_state(&self) -> RiskState {
        match (self.negation, self.risky_claim) {
            (true, true) => RiskState::Fracture,
            (false, true) => RiskState::Alignment,
            (true, false) => RiskState::Divergence,
            (false, false) => RiskState::Harmony,
        }
    }

    /// Scrutiny score before any mode or cost adjustments.
    pub fn base_need(&self) -> f64 {
        let mut need: f64 = 0.35;
        if self.has_numbers {
            need += 0.15;
        }
        if self.risky_claim {
            need += 0.15;
        }
        if self.negation {
            need += 0.10;
        }
        need.clamp(0.0, 1.0)
    }

    pub fn tension(&self) -> f64 {
        if self.risky_claim { 0.35 } else { 0.18 }
    }

    pub fn shape(&self) -> Shape {
        if self.has_numbers || self.risky_claim {
            Shape::Triangle
        } else {
            Shape::Line
        }
    }
}

/// Decision returned for blank input in every mode.
pub fn empty_decision(mode: Mode) -> Decision {
    Decision {
        tier: Tier::Mini,
        risk_state: RiskState::Harmony,
        need_score: 0.0,
        is_fracture: false,
        short_signal_cap_applied: false,
        high_stakes: false,
        match_kind: MatchKind::Empty,
        mode,
        stability_score: Some(0.95),
        tension_score: Some(0.0),
        shape: Some(Shape::Point),
        similarity: None,
        nearest_text: None,
        notes: None,
        governance: GovernanceAction::Unchanged,
    }
}

/// Keyword and threshold classifier.
#[derive(Debug, Clone, Copy)]
pub struct FallbackClassifier {
    fracture_tier: Tier,
}

impl Default for FallbackClassifier {
    fn default() -> Self {
        Self {
            fracture_tier: Tier::Premium,
        }
    }
}

impl FallbackClassifier {
    /// Classifier routing fractures to `fracture_tier`. MINI is raised to
    /// STANDARD so the classifier can never emit a fracture in MINI.
    pub fn new(fracture_tier: Tier) -> Self {
        Self {
            fracture_tier: fracture_tier.max(Tier::Standard),
        }
    }

    pub fn fracture_tier(&self) -> Tier {
        self.fracture_tier
    }

    /// Classify `text` under `mode`. The result has not been through governance.
    pub fn classify(&self, text: &str, mode: Mode) -> Decision {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return empty_decision(mode);
        }

        let features = Features::extract(trimmed);
        let risk_state = features.risk_state();
        let thresholds = Thresholds::for_mode(mode);
        let mut need = features.base_need();
        let mut short_signal_cap_applied = false;

        let tier = if features.is_fracture() {
            need = need.max(FRACTURE_NEED_FLOOR);
            self.fracture_tier
        } else if !mode.allows_mini() {
            if need <= thresholds.standard_base {
                Tier::Standard
            } else {
                Tier::Premium
            }
        } else {
            if features.high_stakes {
                need = need.max(thresholds.mini_base + 0.01);
            }
            if trimmed.chars().count() < SHORT_SIGNAL_CHARS && !features.high_stakes {
                need = need.min(thresholds.mini_base);
                short_signal_cap_applied = true;
            }
            if need <= thresholds.mini_base {
                Tier::Mini
            } else if need <= thresholds.standard_base {
                Tier::Standard
            } else {
                Tier::Premium
            }
        };

        debug!(
            tier = %tier,
            risk_state = %risk_state,
            need,
            short_signal_cap_applied,
            high_stakes = features.high_stakes,
            "fallback classification"
        );

        Decision {
            tier,
            risk_state,
            need_score: need.clamp(0.0, 1.0),
            is_fracture: risk_state.is_fracture(),
            short_signal_cap_applied,
            high_stakes: features.high_stakes,
            match_kind: MatchKind::Fallback,
            mode,
            stability_score: Some(risk_state.nominal_stability()),
            tension_score: Some(features.tension()),
            shape: Some(features.shape()),
            similarity: None,
            nearest_text: None,
            notes: None,
            governance: GovernanceAction::Unchanged,
        }
    }
}
