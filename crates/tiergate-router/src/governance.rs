// SPDX-FileCopyrightText: 2026 Tiergate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Final safety gate applied to every decision.
//!
//! Rules only ever raise the tier, so applying them twice changes nothing.

use tiergate_core::{Decision, GovernanceAction, MatchKind, Mode, Tier};
use tracing::debug;

/// Apply governance rules to a candidate decision.
///
/// - A fracture decision in MINI is lifted to STANDARD.
/// - In conservative mode, a MINI decision is lifted to STANDARD, except for
///   the blank-input short-circuit which carries nothing to protect.
pub fn enforce(decision: Decision, mode: Mode) -> Decision {
    if decision.tier != Tier::Mini {
        return decision;
    }

    let action = if decision.is_fracture {
        GovernanceAction::FractureFloor
    } else if !mode.allows_mini() && decision.match_kind != MatchKind::Empty {
        GovernanceAction::ConservativeFloor
    } else {
        return decision;
    };

    debug!(
        action = %action,
        match_kind = %decision.match_kind,
        mode = %mode,
        "governance raised MINI to STANDARD"
    );
    Decision {
        tier: Tier::Standard,
        governance: action,
        ..decision
    }
}
