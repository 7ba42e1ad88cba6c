// SPDX-FileCopyrightText: 2026 Tiergate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the tiergate routing engine.
//!
//! This crate provides the vocabulary shared by every other tiergate crate:
//! service tiers, risk states, operating modes, the per-request [`Decision`]
//! record, and the [`TierGateError`] taxonomy. It has no routing logic of its
//! own.

pub mod decision;
pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use decision::{Decision, GovernanceAction};
pub use error::TierGateError;
pub use types::{Language, MatchKind, Mode, RiskState, Shape, Tier};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiergate_error_has_all_variants() {
        let _mode = TierGateError::InvalidMode {
            name: "turbo".into(),
        };
        let _corpus = TierGateError::CorpusLoad {
            message: "test".into(),
            source: Some(Box::new(std::io::Error::other("test"))),
        };
        let _dataset = TierGateError::Dataset {
            message: "test".into(),
            source: None,
        };
        let _violation = TierGateError::GovernanceViolation {
            mode: Mode::Balanced,
            count: 1,
        };
        let _report = TierGateError::Report {
            message: "test".into(),
            source: None,
        };
        let _config = TierGateError::Config("test".into());
        let _internal = TierGateError::Internal("test".into());
    }

    #[test]
    fn invalid_mode_message_names_valid_modes() {
        let err = TierGateError::InvalidMode {
            name: "turbo".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("turbo"));
        assert!(msg.contains("conservative"));
        assert!(msg.contains("aggressive"));
    }

    #[test]
    fn governance_violation_message_is_distinct() {
        let err = TierGateError::GovernanceViolation {
            mode: Mode::Aggressive,
            count: 3,
        };
        assert_eq!(
            err.to_string(),
            "governance violation in aggressive mode: 3 fracture sample(s) routed to MINI"
        );
    }
}
