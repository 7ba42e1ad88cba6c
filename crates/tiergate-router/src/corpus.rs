// SPDX-FileCopyrightText: 2026 Tiergate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reference corpus loading and normalization.
//!
//! Raw corpora arrive as arbitrarily nested JSON-like trees. They are
//! flattened into [`ReferenceSample`]s by a recursive-descent walk over
//! [`RawValue`], normalized (language default, tier aliases), and
//! governance-corrected so that no stored sample routes a fracture to MINI.
//! The resulting [`Corpus`] is immutable and shared without locking.

use std::collections::BTreeMap;
use std::path::Path;

use tiergate_core::{Language, RiskState, Shape, Tier, TierGateError};
use tracing::{debug, info, warn};

use crate::similarity::normalize_text;

/// Nesting depth past which a corpus is rejected. Source data is tree-shaped,
/// so anything deeper is treated as malformed.
pub const MAX_DEPTH: usize = 64;

/// A loosely typed value tree handed over by an external corpus loader.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Object(BTreeMap<String, RawValue>),
    Array(Vec<RawValue>),
    Scalar(Scalar),
}

/// Leaf values of a [`RawValue`] tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

impl From<serde_json::Value> for RawValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Object(map) => {
                RawValue::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
            Value::Array(items) => RawValue::Array(items.into_iter().map(Into::into).collect()),
            Value::String(s) => RawValue::Scalar(Scalar::String(s)),
            Value::Number(n) => RawValue::Scalar(n.as_f64().map_or(Scalar::Null, Scalar::Number)),
            Value::Bool(b) => RawValue::Scalar(Scalar::Bool(b)),
            Value::Null => RawValue::Scalar(Scalar::Null),
        }
    }
}

type Record = BTreeMap<String, RawValue>;

/// One previously labeled request.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceSample {
    pub text: String,
    pub language: Language,
    pub tier: Tier,
    pub risk_state: RiskState,
    pub stability_score: Option<f64>,
    pub tension_score: Option<f64>,
    pub shape: Option<Shape>,
    pub need_score: Option<f64>,
    pub notes: Option<String>,
    normalized: String,
}

impl ReferenceSample {
    /// Create a sample with no auxiliary scores.
    pub fn new(
        text: impl Into<String>,
        language: Language,
        tier: Tier,
        risk_state: RiskState,
    ) -> Self {
        let text = text.into();
        let normalized = normalize_text(&text);
        Self {
            text,
            language,
            tier,
            risk_state,
            stability_score: None,
            tension_score: None,
            shape: None,
            need_score: None,
            notes: None,
            normalized,
        }
    }

    /// Text after case and whitespace normalization, used for matching.
    pub fn normalized_text(&self) -> &str {
        &self.normalized
    }

    fn from_record(record: &Record) -> Result<Self, SkipReason> {
        let text = str_field(record, &["text"])
            .filter(|t| !t.trim().is_empty())
            .ok_or(SkipReason::NoText)?;

        let language = match str_field(record, &["lang", "language"]) {
            None => Language::En,
            Some(code) => {
                Language::from_code(code).ok_or_else(|| SkipReason::Language(code.to_string()))?
            }
        };

        let mut sample = Self::new(
            text,
            language,
            Tier::normalize(str_field(record, &["route", "tier"])),
            RiskState::normalize(str_field(record, &["state4", "risk_state"])),
        );
        sample.stability_score = num_field(record, &["zs", "stability_score"]);
        sample.tension_score = num_field(record, &["theta", "tension_score"]);
        sample.shape = str_field(record, &["shape"]).and_then(|s| s.trim().parse().ok());
        sample.need_score = num_field(record, &["need", "need_score"]);
        sample.notes = str_field(record, &["notes"]).map(str::to_string);
        Ok(sample)
    }
}

enum SkipReason {
    NoText,
    Language(String),
}

fn str_field<'a>(record: &'a Record, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|k| match record.get(*k) {
        Some(RawValue::Scalar(Scalar::String(s))) => Some(s.as_str()),
        _ => None,
    })
}

fn num_field(record: &Record, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|k| match record.get(*k) {
        Some(RawValue::Scalar(Scalar::Number(n))) if n.is_finite() => Some(*n),
        Some(RawValue::Scalar(Scalar::String(s))) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Counters describing what happened while a corpus was built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Objects recognized as records (carrying a `text` key).
    pub records_seen: usize,
    pub kept: usize,
    pub dropped_no_text: usize,
    pub dropped_language: usize,
    /// Fracture samples rewritten from MINI to STANDARD.
    pub fracture_corrected: usize,
}

/// Immutable, governance-corrected collection of reference samples.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    samples: Vec<ReferenceSample>,
    stats: LoadStats,
}

impl Corpus {
    /// An empty corpus. Engines built on it classify by fallback only.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a corpus from already-typed samples, applying load-time governance.
    pub fn from_samples(samples: Vec<ReferenceSample>) -> Self {
        let stats = LoadStats {
            records_seen: samples.len(),
            ..LoadStats::default()
        };
        Self::finish(samples, stats)
    }

    /// Flatten and normalize a raw value tree.
    ///
    /// Arrays are walked in order. Objects carrying a `text` key are records;
    /// other objects are containers whose values are walked in key order.
    /// Scalars are ignored.
    pub fn from_raw(raw: &RawValue) -> Result<Self, TierGateError> {
        let mut records = Vec::new();
        collect_records(raw, 0, &mut records)?;

        let mut stats = LoadStats {
            records_seen: records.len(),
            ..LoadStats::default()
        };
        let mut samples = Vec::with_capacity(records.len());
        for record in records {
            match ReferenceSample::from_record(record) {
                Ok(sample) => samples.push(sample),
                Err(SkipReason::NoText) => stats.dropped_no_text += 1,
                Err(SkipReason::Language(code)) => {
                    warn!(language = %code, "dropping corpus record with unsupported language");
                    stats.dropped_language += 1;
                }
            }
        }
        Ok(Self::finish(samples, stats))
    }

    /// Build a corpus from a parsed JSON document.
    pub fn from_json(value: serde_json::Value) -> Result<Self, TierGateError> {
        Self::from_raw(&RawValue::from(value))
    }

    fn finish(mut samples: Vec<ReferenceSample>, mut stats: LoadStats) -> Self {
        for sample in &mut samples {
            if sample.risk_state == RiskState::Fracture && sample.tier == Tier::Mini {
                debug!(text = %sample.text, "corpus fracture sample lifted from MINI to STANDARD");
                sample.tier = Tier::Standard;
                stats.fracture_corrected += 1;
            }
        }
        stats.kept = samples.len();
        Self { samples, stats }
    }

    pub fn samples(&self) -> &[ReferenceSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn stats(&self) -> LoadStats {
        self.stats
    }
}

fn collect_records<'a>(
    value: &'a RawValue,
    depth: usize,
    out: &mut Vec<&'a Record>,
) -> Result<(), TierGateError> {
    if depth > MAX_DEPTH {
        return Err(TierGateError::CorpusLoad {
            message: format!("corpus nesting exceeds {MAX_DEPTH} levels"),
            source: None,
        });
    }
    match value {
        RawValue::Array(items) => {
            for item in items {
                collect_records(item, depth + 1, out)?;
            }
        }
        RawValue::Object(record) if record.contains_key("text") => out.push(record),
        RawValue::Object(container) => {
            for child in container.values() {
                collect_records(child, depth + 1, out)?;
            }
        }
        RawValue::Scalar(_) => {}
    }
    Ok(())
}

/// Parse corpus text: a single JSON document, or JSON Lines when that fails.
pub fn parse_corpus_str(content: &str) -> Result<Corpus, TierGateError> {
    let value = match serde_json::from_str::<serde_json::Value>(content) {
        Ok(value) => value,
        Err(doc_err) => {
            let lines: Result<Vec<serde_json::Value>, _> = content
                .lines()
                .filter(|l| !l.trim().is_empty())
                .map(serde_json::from_str)
                .collect();
            match lines {
                Ok(items) => serde_json::Value::Array(items),
                Err(_) => {
                    return Err(TierGateError::CorpusLoad {
                        message: "corpus is neither a JSON document nor JSON Lines".to_string(),
                        source: Some(Box::new(doc_err)),
                    });
                }
            }
        }
    };
    Corpus::from_json(value)
}

/// Read and parse a corpus file.
pub fn load_corpus_file(path: &Path) -> Result<Corpus, TierGateError> {
    let content = std::fs::read_to_string(path).map_err(|e| TierGateError::CorpusLoad {
        message: format!("failed to read {}", path.display()),
        source: Some(Box::new(e)),
    })?;
    let corpus = parse_corpus_str(&content)?;
    let stats = corpus.stats();
    info!(
        path = %path.display(),
        records = stats.records_seen,
        kept = stats.kept,
        dropped_no_text = stats.dropped_no_text,
        dropped_language = stats.dropped_language,
        fracture_corrected = stats.fracture_corrected,
        "reference corpus loaded"
    );
    Ok(corpus)
}
