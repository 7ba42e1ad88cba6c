// SPDX-FileCopyrightText: 2026 Tiergate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./tiergate.toml` > `~/.config/tiergate/tiergate.toml` >
//! `/etc/tiergate/tiergate.toml` with environment variable overrides via `TIERGATE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TierGateConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/tiergate/tiergate.toml` (system-wide)
/// 3. `~/.config/tiergate/tiergate.toml` (user XDG config)
/// 4. `./tiergate.toml` (local directory)
/// 5. `TIERGATE_*` environment variables
pub fn load_config() -> Result<TierGateConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<TierGateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TierGateConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TierGateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TierGateConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(TierGateConfig::default()))
        .merge(Toml::file("/etc/tiergate/tiergate.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("tiergate/tiergate.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("tiergate.toml"))
        .merge(env_provider())
}

/// Environment provider mapping `TIERGATE_<SECTION>_<KEY>` to `section.key`.
///
/// Uses `Env::map()` rather than `Env::split("_")` so keys containing
/// underscores survive: `TIERGATE_BENCH_MAX_SAMPLES` is `bench.max_samples`.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("TIERGATE_").map(|key| {
        let mapped = key
            .as_str()
            .to_ascii_lowercase()
            .replacen("engine_", "engine.", 1)
            .replacen("bench_", "bench.", 1)
            .replacen("logging_", "logging.", 1);
        mapped.into()
    })
}
