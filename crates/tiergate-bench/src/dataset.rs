// SPDX-FileCopyrightText: 2026 Tiergate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON Lines benchmark datasets.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tiergate_core::{Language, TierGateError};
use tracing::{info, warn};

/// One request to replay through the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchSample {
    pub id: String,
    pub text: String,
    /// Language code passed through to the engine unchanged.
    pub lang: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
}

impl BenchSample {
    pub fn new(id: impl Into<String>, text: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            lang: lang.into(),
            dataset: None,
        }
    }
}

/// Parse JSON Lines samples belonging to `dataset`.
///
/// Blank lines are ignored and malformed lines are skipped with a warning.
/// `lang_override` replaces each record's own language; otherwise it
/// defaults to `EN`. Records without an `id` get `{dataset}_{index:04}`.
pub fn parse_jsonl(content: &str, dataset: &str, lang_override: Option<Language>) -> Vec<BenchSample> {
    let mut samples = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record: serde_json::Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(err) => {
                warn!(dataset, line = line_no + 1, error = %err, "skipping malformed dataset line");
                continue;
            }
        };
        let field = |key: &str| record.get(key).and_then(|v| v.as_str());

        let lang = match lang_override {
            Some(lang) => lang.to_string(),
            None => field("lang").unwrap_or("EN").to_string(),
        };
        let id = field("id")
            .map(str::to_string)
            .unwrap_or_else(|| format!("{dataset}_{:04}", samples.len()));

        samples.push(BenchSample {
            id,
            text: field("text").unwrap_or_default().to_string(),
            lang,
            dataset: Some(dataset.to_string()),
        });
    }
    samples
}

/// Read a JSON Lines dataset file.
pub fn load_jsonl(
    path: &Path,
    dataset: &str,
    lang_override: Option<Language>,
) -> Result<Vec<BenchSample>, TierGateError> {
    let content = std::fs::read_to_string(path).map_err(|e| TierGateError::Dataset {
        message: format!("failed to read {}", path.display()),
        source: Some(Box::new(e)),
    })?;
    let samples = parse_jsonl(&content, dataset, lang_override);
    info!(dataset, path = %path.display(), samples = samples.len(), "dataset loaded");
    Ok(samples)
}
