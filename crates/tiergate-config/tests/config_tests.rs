// SPDX-FileCopyrightText: 2026 Tiergate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the tiergate configuration system.

use tiergate_config::diagnostic::ConfigError;
use tiergate_config::model::TierGateConfig;
use tiergate_config::{load_and_validate_str, load_config_from_str};
use tiergate_core::{Mode, Tier};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_config() {
    let toml = r#"
[engine]
mode = "aggressive"
corpus_path = "/var/lib/tiergate/corpus.json"
fracture_tier = "STANDARD"

[bench]
modes = ["balanced", "aggressive"]
max_samples = 4200
deadline_secs = 30
output_dir = "/tmp/bench"

[logging]
level = "debug"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.engine.mode().unwrap(), Mode::Aggressive);
    assert_eq!(
        config.engine.corpus_path.as_deref(),
        Some("/var/lib/tiergate/corpus.json")
    );
    assert_eq!(config.engine.fracture_tier, Tier::Standard);
    assert_eq!(
        config.bench.modes().unwrap(),
        vec![Mode::Balanced, Mode::Aggressive]
    );
    assert_eq!(config.bench.max_samples, Some(4200));
    assert_eq!(config.bench.deadline_secs, Some(30));
    assert_eq!(config.bench.output_dir, "/tmp/bench");
    assert_eq!(config.logging.level, "debug");
}

/// Missing sections use defaults without error.
#[test]
fn missing_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");
    assert_eq!(config.engine.mode().unwrap(), Mode::Balanced);
    assert!(config.engine.corpus_path.is_none());
    assert_eq!(config.engine.fracture_tier, Tier::Premium);
    assert_eq!(config.bench.modes().unwrap(), Mode::ALL.to_vec());
    assert_eq!(config.logging.level, "info");
}

/// Unknown key in [engine] is rejected.
#[test]
fn unknown_field_in_engine_produces_error() {
    let toml = r#"
[engine]
mdoe = "balanced"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("mdoe"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Unknown key becomes an UnknownKey diagnostic with a suggestion.
#[test]
fn unknown_key_diagnostic_suggests_correction() {
    let toml = r#"
[engine]
mdoe = "balanced"
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail");
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::UnknownKey { key, suggestion: Some(s), .. } if key == "mdoe" && s == "mode"
    )));
}

/// Deserialization succeeds but validation rejects an unknown mode.
#[test]
fn invalid_mode_is_a_validation_diagnostic() {
    let toml = r#"
[engine]
mode = "turbo"
"#;

    let errors = load_and_validate_str(toml).expect_err("unknown mode should fail validation");
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::InvalidValue { key, .. } if key == "engine.mode")));
}

/// Fracture tier cannot be configured to MINI.
#[test]
fn fracture_tier_mini_is_rejected() {
    let toml = r#"
[engine]
fracture_tier = "MINI"
"#;

    let errors = load_and_validate_str(toml).expect_err("MINI fracture tier should fail");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("fracture_tier"))
    ));
}

/// Wrong value type produces an InvalidType diagnostic.
#[test]
fn wrong_type_is_reported() {
    let toml = r#"
[bench]
max_samples = "lots"
"#;

    let errors = load_and_validate_str(toml).expect_err("string max_samples should fail");
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::InvalidType { .. } | ConfigError::Other(_))));
}

/// Unexpected top-level section is rejected by deny_unknown_fields.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[gateway]
port = 8080
"#;

    let err = load_config_from_str(toml).expect_err("unknown top-level section should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("gateway"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// `TIERGATE_<SECTION>_<KEY>` env vars map onto dotted keys, including keys
/// that themselves contain underscores.
#[test]
fn env_vars_override_file_values() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "tiergate.toml",
            r#"
[engine]
mode = "balanced"
"#,
        )?;
        jail.set_env("TIERGATE_ENGINE_MODE", "conservative");
        jail.set_env("TIERGATE_BENCH_MAX_SAMPLES", "25");

        let config =
            tiergate_config::load_config_from_path(std::path::Path::new("tiergate.toml"))?;
        assert_eq!(config.engine.mode().unwrap(), Mode::Conservative);
        assert_eq!(config.bench.max_samples, Some(25));
        Ok(())
    });
}

/// Missing config files are silently skipped (Figment's Toml::file() behavior).
#[test]
fn missing_config_files_silently_skipped() {
    use figment::{
        providers::{Format, Serialized, Toml},
        Figment,
    };

    let config: TierGateConfig = Figment::new()
        .merge(Serialized::defaults(TierGateConfig::default()))
        .merge(Toml::file("/nonexistent/path/tiergate.toml"))
        .extract()
        .expect("missing file should be silently skipped");

    assert_eq!(config.engine.mode, "balanced");
}
