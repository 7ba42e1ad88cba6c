// SPDX-FileCopyrightText: 2026 Tiergate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Relative tier costs and savings accounting for the tiergate engine.
//!
//! Costs are unitless weights relative to PREMIUM (100), so savings read as
//! "percent cheaper than sending everything to PREMIUM".

pub mod pricing;

pub use pricing::{cost_savings_pct, tier_weight, TierCounts, PREMIUM_BASELINE};
