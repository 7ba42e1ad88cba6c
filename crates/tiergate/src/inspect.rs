// SPDX-FileCopyrightText: 2026 Tiergate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tiergate inspect` and `tiergate modes` command implementations.

use colored::{ColoredString, Colorize};
use tiergate_config::TierGateConfig;
use tiergate_core::{Decision, Tier, TierGateError};
use tiergate_router::{describe, ModeDescription, RoutingEngine};

/// Run the `tiergate inspect` command.
pub fn run_inspect(
    config: &TierGateConfig,
    text: &str,
    lang: &str,
    json: bool,
) -> Result<(), TierGateError> {
    let engine = RoutingEngine::from_config(&config.engine)?;
    let decision = engine.classify(text, lang);

    if json {
        println!("{}", to_json(&decision)?);
    } else {
        print!("{}", render_decision(&decision));
    }
    Ok(())
}

/// Run the `tiergate modes` command.
pub fn run_modes(config: &TierGateConfig, json: bool) -> Result<(), TierGateError> {
    let description = describe(config.engine.mode()?);
    if json {
        println!("{}", to_json(&description)?);
    } else {
        print!("{}", render_modes(&description));
    }
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, TierGateError> {
    serde_json::to_string_pretty(value).map_err(|e| TierGateError::Internal(e.to_string()))
}

pub(crate) fn paint_tier(tier: Tier) -> ColoredString {
    let label = tier.to_string();
    match tier {
        Tier::Mini => label.green(),
        Tier::Standard => label.yellow(),
        Tier::Premium => label.magenta(),
    }
}

fn render_decision(d: &Decision) -> String {
    let mut out = String::new();
    out.push_str(&format!("  {:<14} {}\n", "tier", paint_tier(d.tier).bold()));
    let state = if d.is_fracture {
        d.risk_state.to_string().red().bold()
    } else {
        d.risk_state.to_string().normal()
    };
    out.push_str(&format!("  {:<14} {state}\n", "risk_state"));
    out.push_str(&format!("  {:<14} {:.3}\n", "need_score", d.need_score));
    out.push_str(&format!("  {:<14} {}\n", "match", d.match_kind));
    if let Some(score) = d.similarity {
        out.push_str(&format!("  {:<14} {score:.3}\n", "similarity"));
    }
    if let Some(nearest) = &d.nearest_text {
        out.push_str(&format!("  {:<14} {nearest}\n", "nearest"));
    }
    if let Some(notes) = &d.notes {
        out.push_str(&format!("  {:<14} {notes}\n", "notes"));
    }
    out.push_str(&format!("  {:<14} {}\n", "mode", d.mode));
    out.push_str(&format!("  {:<14} {}\n", "short_signal", d.short_signal_cap_applied));
    out.push_str(&format!("  {:<14} {}\n", "high_stakes", d.high_stakes));
    if let Some(shape) = d.shape {
        out.push_str(&format!("  {:<14} {shape}\n", "shape"));
    }
    if let (Some(zs), Some(theta)) = (d.stability_score, d.tension_score) {
        out.push_str(&format!("  {:<14} {zs:.2} / {theta:.2}\n", "zs / theta"));
    }
    out.push_str(&format!("  {:<14} {}\n", "governance", d.governance));
    out
}

fn render_modes(description: &ModeDescription) -> String {
    let mut out = String::new();
    out.push_str(&format!("  {}\n", "tiergate modes".bold()));
    out.push_str(&format!("  {}\n", "-".repeat(60)));
    for (mode, text) in &description.mode_descriptions {
        let marker = if *mode == description.mode { "*".green().to_string() } else { " ".to_string() };
        out.push_str(&format!("{marker} {:<13} {text}\n", mode.to_string()));
    }
    out.push_str(&format!(
        "\n  active thresholds: mini_base={:.2} standard_base={:.2}\n",
        description.thresholds.mini_base, description.thresholds.standard_base
    ));
    out.push_str(&format!("  governance: {}\n", description.governance_summary));
    out
}
