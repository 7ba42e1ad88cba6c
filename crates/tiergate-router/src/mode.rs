// SPDX-FileCopyrightText: 2026 Tiergate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-mode decision thresholds and operator-facing mode descriptions.

use serde::Serialize;
use tiergate_core::Mode;

/// Need-score cut points for one mode.
///
/// A need at or below `mini_base` routes to MINI (when the mode allows it), at
/// or below `standard_base` to STANDARD, and above it to PREMIUM.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    pub mini_base: f64,
    pub standard_base: f64,
}

impl Thresholds {
    pub const fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Conservative => Self {
                mini_base: 0.05,
                standard_base: 0.55,
            },
            Mode::Balanced => Self {
                mini_base: 0.25,
                standard_base: 0.55,
            },
            Mode::Aggressive => Self {
                mini_base: 0.35,
                standard_base: 0.55,
            },
        }
    }
}

/// Snapshot of the active mode for operators and the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct ModeDescription {
    pub mode: Mode,
    pub thresholds: Thresholds,
    pub available_modes: Vec<Mode>,
    pub mode_descriptions: Vec<(Mode, &'static str)>,
    pub governance_summary: &'static str,
}

const GOVERNANCE_SUMMARY: &str =
    "Fracture requests never route to MINI; conservative mode never routes to MINI";

/// Describe `mode` along with every alternative.
pub fn describe(mode: Mode) -> ModeDescription {
    ModeDescription {
        mode,
        thresholds: Thresholds::for_mode(mode),
        available_modes: Mode::ALL.to_vec(),
        mode_descriptions: Mode::ALL.iter().map(|m| (*m, m.description())).collect(),
        governance_summary: GOVERNANCE_SUMMARY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_per_mode() {
        assert_eq!(Thresholds::for_mode(Mode::Conservative).mini_base, 0.05);
        assert_eq!(Thresholds::for_mode(Mode::Balanced).mini_base, 0.25);
        assert_eq!(Thresholds::for_mode(Mode::Aggressive).mini_base, 0.35);
        for mode in Mode::ALL {
            assert_eq!(Thresholds::for_mode(mode).standard_base, 0.55);
        }
    }

    #[test]
    fn mini_base_grows_with_aggressiveness() {
        let bases: Vec<f64> = Mode::ALL
            .iter()
            .map(|m| Thresholds::for_mode(*m).mini_base)
            .collect();
        assert!(bases.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn description_lists_all_modes() {
        let d = describe(Mode::Aggressive);
        assert_eq!(d.mode, Mode::Aggressive);
        assert_eq!(d.available_modes.len(), 3);
        assert_eq!(d.mode_descriptions.len(), 3);
        assert!(d.governance_summary.contains("never route to MINI"));

        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["mode"], "aggressive");
        assert_eq!(json["thresholds"]["mini_base"], 0.35);
    }
}
