// SPDX-FileCopyrightText: 2026 Tiergate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Closed vocabularies shared across the routing engine.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::TierGateError;

/// Downstream service tiers, ordered by cost (`Mini < Standard < Premium`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    /// Cheapest tier: local or domestic model.
    Mini,
    /// Budget global model.
    Standard,
    /// Premium global model.
    Premium,
}

/// Historical route names, checked as case-insensitive substrings in this order.
const TIER_ALIASES: &[(&str, Tier)] = &[
    ("BYPASS", Tier::Mini),
    ("LITE", Tier::Standard),
    ("FULL", Tier::Premium),
];

impl Tier {
    /// All tiers, cheapest first.
    pub const ALL: [Tier; 3] = [Tier::Mini, Tier::Standard, Tier::Premium];

    /// Normalize a raw route label into a tier.
    ///
    /// Legacy labels (`BYPASS`, `Lite (v1.5 minimal)`, `full`, ...) map onto the
    /// current names, current names pass through, and anything else (including
    /// an absent label) becomes [`Tier::Standard`]. The mapping is idempotent.
    pub fn normalize(raw: Option<&str>) -> Tier {
        let Some(raw) = raw else {
            return Tier::Standard;
        };
        let upper = raw.trim().to_uppercase();
        TIER_ALIASES
            .iter()
            .find(|(alias, _)| upper.contains(alias))
            .map(|(_, tier)| *tier)
            .unwrap_or_else(|| upper.parse().unwrap_or(Tier::Standard))
    }
}

/// Qualitative rhetorical risk profile of a request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum RiskState {
    /// No risky claim, no negation.
    Harmony,
    /// Negation without a risky claim.
    Divergence,
    /// Risky or absolute claim without negation.
    Alignment,
    /// Negation combined with a risky claim. Never routed to MINI.
    Fracture,
}

impl RiskState {
    /// Parse a stored risk-state label, defaulting to [`RiskState::Harmony`].
    pub fn normalize(raw: Option<&str>) -> RiskState {
        raw.and_then(|s| s.trim().parse().ok())
            .unwrap_or(RiskState::Harmony)
    }

    /// Fixed nominal stability score assigned by the fallback classifier.
    pub fn nominal_stability(self) -> f64 {
        match self {
            RiskState::Fracture => 0.32,
            RiskState::Alignment => 0.55,
            RiskState::Divergence => 0.60,
            RiskState::Harmony => 0.72,
        }
    }

    pub fn is_fracture(self) -> bool {
        self == RiskState::Fracture
    }
}

/// Request language.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum Language {
    En,
    Ko,
}

impl Language {
    /// Parse a language code (`"EN"`, `"ko"`, ...). Unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Language> {
        code.trim().parse().ok()
    }
}

/// Engine operating point.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// MINI disabled; maximum safety for pilots and trust-building.
    Conservative,
    /// Default cost/safety balance.
    #[default]
    Balanced,
    /// Maximum MINI routing for cost optimization.
    Aggressive,
}

impl Mode {
    /// All modes, from least to most cost-aggressive.
    pub const ALL: [Mode; 3] = [Mode::Conservative, Mode::Balanced, Mode::Aggressive];

    /// Validate a mode name against the closed mode set.
    ///
    /// Names are matched exactly: `"Balanced"` and `" balanced"` are rejected.
    pub fn from_name(name: &str) -> Result<Mode, TierGateError> {
        name.parse().map_err(|_| TierGateError::InvalidMode {
            name: name.to_string(),
        })
    }

    /// Whether the decision logic may ever select [`Tier::Mini`] in this mode.
    pub fn allows_mini(self) -> bool {
        self != Mode::Conservative
    }

    /// One-line operator description.
    pub fn description(self) -> &'static str {
        match self {
            Mode::Conservative => "MINI disabled, maximum safety for pilot/trust-building",
            Mode::Balanced => "Default mode, cost-safety balance for general operation",
            Mode::Aggressive => "Maximum MINI routing for cost optimization",
        }
    }
}

/// Coarse structural tag carried in decision traces.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum Shape {
    /// Empty input.
    #[strum(to_string = "POINT", serialize = "·")]
    Point,
    /// Plain statement.
    #[strum(to_string = "LINE", serialize = "—")]
    Line,
    /// Statement carrying numbers or risky claims.
    #[strum(to_string = "TRIANGLE", serialize = "△")]
    Triangle,
}

/// Which path of the routing state machine produced a decision.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Blank input short-circuit.
    Empty,
    /// Normalized-text replay of a corpus sample.
    Exact,
    /// Nearest-neighbour corpus sample above the similarity threshold.
    Fuzzy,
    /// Rule-based fallback classifier.
    Fallback,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn legacy_aliases_normalize() {
        let cases = [
            ("BYPASS", Tier::Mini),
            ("Bypass (no MSR)", Tier::Mini),
            ("bypass", Tier::Mini),
            ("LITE", Tier::Standard),
            ("Lite (v1.5 minimal)", Tier::Standard),
            ("lite", Tier::Standard),
            ("FULL", Tier::Premium),
            ("Full (v2.5+)", Tier::Premium),
            ("full", Tier::Premium),
        ];
        for (raw, expected) in cases {
            assert_eq!(Tier::normalize(Some(raw)), expected, "input {raw:?}");
        }
    }

    #[test]
    fn current_names_pass_through() {
        assert_eq!(Tier::normalize(Some("MINI")), Tier::Mini);
        assert_eq!(Tier::normalize(Some("standard")), Tier::Standard);
        assert_eq!(Tier::normalize(Some(" Premium ")), Tier::Premium);
    }

    #[test]
    fn unknown_or_absent_tier_is_standard() {
        assert_eq!(Tier::normalize(None), Tier::Standard);
        assert_eq!(Tier::normalize(Some("")), Tier::Standard);
        assert_eq!(Tier::normalize(Some("UNKNOWN")), Tier::Standard);
        assert_eq!(Tier::normalize(Some("mini tier")), Tier::Standard);
    }

    #[test]
    fn tiers_are_ordered_by_cost() {
        assert!(Tier::Mini < Tier::Standard);
        assert!(Tier::Standard < Tier::Premium);
        assert_eq!(Tier::ALL.iter().max(), Some(&Tier::Premium));
    }

    #[test]
    fn tier_display_and_serde_agree() {
        for tier in Tier::ALL {
            let json = serde_json::to_string(&tier).unwrap();
            assert_eq!(json, format!("\"{tier}\""));
        }
    }

    #[test]
    fn risk_state_normalize_defaults_to_harmony() {
        assert_eq!(RiskState::normalize(Some("Fracture")), RiskState::Fracture);
        assert_eq!(RiskState::normalize(Some("fracture")), RiskState::Fracture);
        assert_eq!(RiskState::normalize(Some("Chaos")), RiskState::Harmony);
        assert_eq!(RiskState::normalize(None), RiskState::Harmony);
    }

    #[test]
    fn nominal_stability_scores() {
        assert!((RiskState::Fracture.nominal_stability() - 0.32).abs() < f64::EPSILON);
        assert!((RiskState::Alignment.nominal_stability() - 0.55).abs() < f64::EPSILON);
        assert!((RiskState::Divergence.nominal_stability() - 0.60).abs() < f64::EPSILON);
        assert!((RiskState::Harmony.nominal_stability() - 0.72).abs() < f64::EPSILON);
    }

    #[test]
    fn language_codes() {
        assert_eq!(Language::from_code("EN"), Some(Language::En));
        assert_eq!(Language::from_code("ko"), Some(Language::Ko));
        assert_eq!(Language::from_code(" Ko "), Some(Language::Ko));
        assert_eq!(Language::from_code("JA"), None);
        assert_eq!(Language::Ko.to_string(), "KO");
    }

    #[test]
    fn mode_names() {
        assert_eq!(Mode::from_name("conservative").unwrap(), Mode::Conservative);
        assert_eq!(Mode::from_name("balanced").unwrap(), Mode::Balanced);
        assert_eq!(Mode::from_name("aggressive").unwrap(), Mode::Aggressive);
        assert_eq!(Mode::default(), Mode::Balanced);
        assert_eq!(Mode::Conservative.to_string(), "conservative");
    }

    #[test]
    fn unknown_mode_is_invalid() {
        let err = Mode::from_name("turbo").unwrap_err();
        assert!(matches!(err, TierGateError::InvalidMode { ref name } if name == "turbo"));
        assert!(Mode::from_name("").is_err());
    }

    #[test]
    fn mode_names_are_case_and_space_sensitive() {
        for name in ["Aggressive", " balanced", "CONSERVATIVE", "balanced "] {
            assert!(matches!(
                Mode::from_name(name),
                Err(TierGateError::InvalidMode { name: ref n }) if n == name
            ));
        }
    }

    #[test]
    fn only_conservative_forbids_mini() {
        assert!(!Mode::Conservative.allows_mini());
        assert!(Mode::Balanced.allows_mini());
        assert!(Mode::Aggressive.allows_mini());
    }

    #[test]
    fn shape_accepts_glyphs() {
        assert_eq!("△".parse::<Shape>().unwrap(), Shape::Triangle);
        assert_eq!("line".parse::<Shape>().unwrap(), Shape::Line);
        assert_eq!(Shape::Point.to_string(), "POINT");
    }

    proptest! {
        #[test]
        fn tier_normalization_is_idempotent(raw in ".{0,40}") {
            let once = Tier::normalize(Some(&raw));
            let twice = Tier::normalize(Some(&once.to_string()));
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn alias_embedded_in_free_text_wins(prefix in "[a-z ]{0,8}", suffix in "[a-z ()0-9.]{0,12}") {
            let raw = format!("{prefix}BYPASS{suffix}");
            prop_assert_eq!(Tier::normalize(Some(&raw)), Tier::Mini);
        }
    }
}
