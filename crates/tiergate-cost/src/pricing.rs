// SPDX-FileCopyrightText: 2026 Tiergate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tier weight table and cost-savings calculation.
//!
//! MINI:      2
//! STANDARD:  30
//! PREMIUM:   100

use serde::{Deserialize, Serialize};
use tiergate_core::Tier;

/// Weight of one PREMIUM request; the all-PREMIUM baseline per request.
pub const PREMIUM_BASELINE: f64 = 100.0;

/// Relative cost of routing one request to `tier`.
pub fn tier_weight(tier: Tier) -> f64 {
    match tier {
        Tier::Mini => 2.0,
        Tier::Standard => 30.0,
        Tier::Premium => PREMIUM_BASELINE,
    }
}

/// Number of requests routed to each tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct TierCounts {
    pub mini: usize,
    pub standard: usize,
    pub premium: usize,
}

impl TierCounts {
    pub fn record(&mut self, tier: Tier) {
        match tier {
            Tier::Mini => self.mini += 1,
            Tier::Standard => self.standard += 1,
            Tier::Premium => self.premium += 1,
        }
    }

    pub fn get(&self, tier: Tier) -> usize {
        match tier {
            Tier::Mini => self.mini,
            Tier::Standard => self.standard,
            Tier::Premium => self.premium,
        }
    }

    pub fn total(&self) -> usize {
        self.mini + self.standard + self.premium
    }

    /// Percentage of requests routed to `tier`; 0 for an empty count.
    pub fn share_pct(&self, tier: Tier) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.get(tier) as f64 / total as f64 * 100.0,
        }
    }

    /// Summed weights of all routed requests.
    pub fn weighted_cost(&self) -> f64 {
        Tier::ALL
            .iter()
            .map(|t| self.get(*t) as f64 * tier_weight(*t))
            .sum()
    }
}

impl FromIterator<Tier> for TierCounts {
    fn from_iter<I: IntoIterator<Item = Tier>>(iter: I) -> Self {
        let mut counts = TierCounts::default();
        for tier in iter {
            counts.record(tier);
        }
        counts
    }
}

/// Percent saved against routing every request to PREMIUM.
///
/// Formula: `(1 - weighted_cost / (total * 100)) * 100`, and 0 when nothing
/// was routed.
pub fn cost_savings_pct(counts: &TierCounts) -> f64 {
    let total = counts.total();
    if total == 0 {
        return 0.0;
    }
    (1.0 - counts.weighted_cost() / (total as f64 * PREMIUM_BASELINE)) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn weights_follow_tier_order() {
        assert!((tier_weight(Tier::Mini) - 2.0).abs() < f64::EPSILON);
        assert!((tier_weight(Tier::Standard) - 30.0).abs() < f64::EPSILON);
        assert!((tier_weight(Tier::Premium) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn all_premium_saves_nothing() {
        let counts: TierCounts = std::iter::repeat_n(Tier::Premium, 10).collect();
        assert!(cost_savings_pct(&counts).abs() < 1e-9);
    }

    #[test]
    fn all_mini_saves_ninety_eight_percent() {
        let counts: TierCounts = std::iter::repeat_n(Tier::Mini, 4).collect();
        assert!((cost_savings_pct(&counts) - 98.0).abs() < 1e-9);
    }

    #[test]
    fn mixed_routing() {
        let counts = TierCounts {
            mini: 1,
            standard: 2,
            premium: 1,
        };
        // (2 + 60 + 100) / 400 = 0.405
        assert!((cost_savings_pct(&counts) - 59.5).abs() < 1e-9);
        assert!((counts.share_pct(Tier::Standard) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn empty_counts_are_zero() {
        let counts = TierCounts::default();
        assert_eq!(cost_savings_pct(&counts), 0.0);
        assert_eq!(counts.share_pct(Tier::Mini), 0.0);
    }

    #[test]
    fn counts_serialize_with_tier_names() {
        let counts = TierCounts {
            mini: 3,
            standard: 0,
            premium: 1,
        };
        let json = serde_json::to_value(counts).unwrap();
        assert_eq!(json["MINI"], 3);
        assert_eq!(json["PREMIUM"], 1);
    }

    proptest! {
        #[test]
        fn moving_a_request_down_a_tier_never_lowers_savings(
            mini in 0usize..50,
            standard in 1usize..50,
            premium in 1usize..50,
        ) {
            let base = TierCounts { mini, standard, premium };
            let cheaper = TierCounts { mini: mini + 1, standard: standard - 1, premium };
            let cheapest = TierCounts { mini, standard: standard + 1, premium: premium - 1 };
            prop_assert!(cost_savings_pct(&cheaper) >= cost_savings_pct(&base));
            prop_assert!(cost_savings_pct(&cheapest) >= cost_savings_pct(&base));
        }

        #[test]
        fn savings_stay_within_bounds(mini in 0usize..100, standard in 0usize..100, premium in 0usize..100) {
            let s = cost_savings_pct(&TierCounts { mini, standard, premium });
            prop_assert!((0.0..=98.0 + 1e-9).contains(&s));
        }
    }
}
