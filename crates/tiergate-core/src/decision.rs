// SPDX-FileCopyrightText: 2026 Tiergate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The per-request routing decision.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::types::{MatchKind, Mode, RiskState, Shape, Tier};

/// Which governance rule, if any, raised the tier of a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum GovernanceAction {
    /// The candidate tier already satisfied every rule.
    #[default]
    Unchanged,
    /// A fracture decision was lifted out of MINI.
    FractureFloor,
    /// Conservative mode lifted a MINI decision.
    ConservativeFloor,
}

/// Output of one classification.
///
/// Built fresh for every request and owned by the caller. Governance produces a
/// new value rather than editing one in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Tier the request is routed to.
    pub tier: Tier,
    /// Rhetorical risk profile.
    pub risk_state: RiskState,
    /// Continuous scrutiny score in `[0, 1]`.
    pub need_score: f64,
    /// Whether the risk state is [`RiskState::Fracture`].
    pub is_fracture: bool,
    /// Whether the short-signal cost carve-out was applied.
    pub short_signal_cap_applied: bool,
    /// Whether legal/medical/financial terms were detected.
    #[serde(default)]
    pub high_stakes: bool,
    /// State-machine path that produced the decision.
    pub match_kind: MatchKind,
    /// Mode the decision was made under.
    pub mode: Mode,
    /// Stability score from the corpus sample or the fallback rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stability_score: Option<f64>,
    /// Tension score from the corpus sample or the fallback rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tension_score: Option<f64>,
    /// Geometric shape of the risk profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<Shape>,
    /// Similarity to the matched corpus sample (exact and fuzzy paths only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
    /// Text of the corpus sample a fuzzy match replayed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearest_text: Option<String>,
    /// Free-form notes carried by the matched corpus sample.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Governance rule that fired on this decision.
    #[serde(default)]
    pub governance: GovernanceAction,
}

impl Decision {
    /// True when the decision breaks the fracture invariant (`Fracture => tier != MINI`).
    pub fn violates_fracture_invariant(&self) -> bool {
        self.is_fracture && self.tier == Tier::Mini
    }
}
