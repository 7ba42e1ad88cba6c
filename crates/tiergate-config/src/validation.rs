// SPDX-FileCopyrightText: 2026 Tiergate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that serde attributes cannot express: mode
//! names drawn from the closed mode set, the fracture tier floor, and positive
//! benchmark limits.

use std::collections::HashSet;

use tiergate_core::{Mode, Tier};

use crate::diagnostic::{suggest_key, ConfigError};
use crate::model::{parse_mode, TierGateConfig};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &TierGateConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if let Some(err) = check_mode("engine.mode", &config.engine.mode) {
        errors.push(err);
    }

    if config.engine.fracture_tier == Tier::Mini {
        errors.push(ConfigError::Validation {
            message: "engine.fracture_tier must be STANDARD or PREMIUM; fracture requests never route to MINI"
                .to_string(),
        });
    }

    if let Some(path) = &config.engine.corpus_path
        && path.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "engine.corpus_path must not be empty when set".to_string(),
        });
    }

    if config.bench.modes.is_empty() {
        errors.push(ConfigError::Validation {
            message: "bench.modes must list at least one mode".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for (i, mode) in config.bench.modes.iter().enumerate() {
        if let Some(err) = check_mode(&format!("bench.modes[{i}]"), mode) {
            errors.push(err);
        } else if !seen.insert(mode.trim().to_lowercase()) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate mode `{mode}` in bench.modes"),
            });
        }
    }

    if config.bench.max_samples == Some(0) {
        errors.push(ConfigError::Validation {
            message: "bench.max_samples must be at least 1".to_string(),
        });
    }

    if config.bench.deadline_secs == Some(0) {
        errors.push(ConfigError::Validation {
            message: "bench.deadline_secs must be at least 1".to_string(),
        });
    }

    if config.bench.output_dir.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "bench.output_dir must not be empty".to_string(),
        });
    }

    let level = config.logging.level.trim().to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::InvalidValue {
            key: "logging.level".to_string(),
            value: config.logging.level.clone(),
            suggestion: suggest_key(&level, LOG_LEVELS),
            valid_values: LOG_LEVELS.join(", "),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_mode(key: &str, value: &str) -> Option<ConfigError> {
    if parse_mode(value).is_ok() {
        return None;
    }
    let names: Vec<String> = Mode::ALL.iter().map(|m| m.to_string()).collect();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    Some(ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        suggestion: suggest_key(&value.trim().to_lowercase(), &names),
        valid_values: names.join(", "),
    })
}
