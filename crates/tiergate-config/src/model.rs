// SPDX-FileCopyrightText: 2026 Tiergate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the tiergate routing engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};
use tiergate_core::{Mode, Tier, TierGateError};

/// Top-level tiergate configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TierGateConfig {
    /// Routing engine settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Benchmark harness settings.
    #[serde(default)]
    pub bench: BenchConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Routing engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Initial operating mode (conservative, balanced, aggressive).
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Path to the reference corpus (JSON or JSON Lines). `None` runs fallback-only.
    #[serde(default)]
    pub corpus_path: Option<String>,

    /// Tier forced onto fracture decisions by the fallback classifier.
    /// Must be STANDARD or PREMIUM.
    #[serde(default = "default_fracture_tier")]
    pub fracture_tier: Tier,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            corpus_path: None,
            fracture_tier: default_fracture_tier(),
        }
    }
}

impl EngineConfig {
    /// The configured initial mode.
    pub fn mode(&self) -> Result<Mode, TierGateError> {
        parse_mode(&self.mode)
    }
}

/// Parse a mode name from operator input, ignoring case and surrounding space.
///
/// The engine itself only accepts exact names; this is the lenient front door
/// for config files, env vars, and CLI flags.
pub fn parse_mode(value: &str) -> Result<Mode, TierGateError> {
    Mode::from_name(&value.trim().to_ascii_lowercase()).map_err(|_| TierGateError::InvalidMode {
        name: value.to_string(),
    })
}

fn default_mode() -> String {
    Mode::default().to_string()
}

fn default_fracture_tier() -> Tier {
    Tier::Premium
}

/// Benchmark harness configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BenchConfig {
    /// Modes to benchmark, in report order.
    #[serde(default = "default_bench_modes")]
    pub modes: Vec<String>,

    /// Cap on samples classified per mode. `None` runs the whole set.
    #[serde(default)]
    pub max_samples: Option<usize>,

    /// Wall-clock budget per mode, in seconds. `None` means no deadline.
    #[serde(default)]
    pub deadline_secs: Option<u64>,

    /// Directory benchmark artifacts are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            modes: default_bench_modes(),
            max_samples: None,
            deadline_secs: None,
            output_dir: default_output_dir(),
        }
    }
}

impl BenchConfig {
    /// The configured benchmark modes, validated against the closed mode set.
    pub fn modes(&self) -> Result<Vec<Mode>, TierGateError> {
        self.modes.iter().map(|m| parse_mode(m)).collect()
    }
}

fn default_bench_modes() -> Vec<String> {
    Mode::ALL.iter().map(|m| m.to_string()).collect()
}

fn default_output_dir() -> String {
    "benchmark_results".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_mode_input_ignores_case_and_space() {
        assert_eq!(parse_mode(" Aggressive ").unwrap(), Mode::Aggressive);
        assert_eq!(parse_mode("BALANCED").unwrap(), Mode::Balanced);
        let err = parse_mode("Turbo").unwrap_err();
        assert!(matches!(err, TierGateError::InvalidMode { ref name } if name == "Turbo"));
    }

    #[test]
    fn defaults_are_sensible() {
        let config = TierGateConfig::default();
        assert_eq!(config.engine.mode, "balanced");
        assert!(config.engine.corpus_path.is_none());
        assert_eq!(config.engine.fracture_tier, Tier::Premium);
        assert_eq!(
            config.bench.modes,
            vec!["conservative", "balanced", "aggressive"]
        );
        assert!(config.bench.max_samples.is_none());
        assert_eq!(config.bench.output_dir, "benchmark_results");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn engine_mode_parses() {
        let mut engine = EngineConfig::default();
        assert_eq!(engine.mode().unwrap(), Mode::Balanced);
        engine.mode = "aggressive".into();
        assert_eq!(engine.mode().unwrap(), Mode::Aggressive);
        engine.mode = "reckless".into();
        assert!(engine.mode().is_err());
    }

    #[test]
    fn fracture_tier_deserializes_from_tier_name() {
        let config: TierGateConfig = toml::from_str(
            r#"
[engine]
fracture_tier = "STANDARD"
"#,
        )
        .unwrap();
        assert_eq!(config.engine.fracture_tier, Tier::Standard);
    }

    #[test]
    fn bench_deny_unknown_fields() {
        let result = toml::from_str::<TierGateConfig>(
            r#"
[bench]
max_sample = 10
"#,
        );
        assert!(result.is_err());
    }
}
