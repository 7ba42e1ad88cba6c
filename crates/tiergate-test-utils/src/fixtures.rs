// SPDX-FileCopyrightText: 2026 Tiergate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reference corpus and request fixtures.

use serde_json::{json, Value};
use tiergate_core::Language;

/// Exact text of the corpus record stored as `Fracture` + `BYPASS`.
/// Load-time governance must rewrite it to STANDARD.
pub const FRACTURE_BYPASS_TEXT: &str = "It is never safe and this is not guaranteed to work";

/// Exact text of a corpus record routed to MINI (legacy `Bypass (no MSR)` label).
pub const MINI_SAMPLE_TEXT: &str = "Thanks for the quick reply about the meeting room";

/// Exact text of a corpus record routed to PREMIUM (legacy `Full (v2.5+)` label).
pub const PREMIUM_SAMPLE_TEXT: &str = "Summarize the quarterly revenue figures for the board";

/// Korean corpus record routed to STANDARD (legacy `LITE`).
pub const KO_SAMPLE_TEXT: &str = "오늘 회의 일정을 다시 확인해 주세요";

/// A nested raw corpus mixing arrays, wrapper objects, and legacy labels.
///
/// Loads to six samples: one record lacks text, one carries an unknown
/// language, and one has blank text.
pub fn corpus_json() -> Value {
    json!({
        "version": 3,
        "datasets": [
            [
                {
                    "text": MINI_SAMPLE_TEXT,
                    "lang": "EN",
                    "route": "Bypass (no MSR)",
                    "state4": "Harmony",
                    "zs": 0.81,
                    "theta": 0.12,
                    "shape": "LINE",
                    "need": 0.2,
                    "notes": "replayed trace"
                },
                {
                    "text": PREMIUM_SAMPLE_TEXT,
                    "route": "Full (v2.5+)",
                    "state4": "Alignment",
                    "need": 0.7
                },
                {
                    "text": FRACTURE_BYPASS_TEXT,
                    "lang": "en",
                    "route": "BYPASS",
                    "state4": "Fracture",
                    "zs": 0.3
                }
            ],
            {
                "ko": [
                    {
                        "text": KO_SAMPLE_TEXT,
                        "lang": "KO",
                        "route": "LITE",
                        "state4": "Harmony"
                    },
                    {
                        "text": "이 약은 절대 효과가 없다",
                        "lang": "KO",
                        "route": "PREMIUM",
                        "state4": "Fracture"
                    }
                ]
            },
            { "text": null, "lang": "EN", "route": "MINI", "state4": "Harmony" },
            { "text": "Bonjour tout le monde", "lang": "FR", "route": "MINI" },
            { "text": "   ", "lang": "EN", "route": "MINI" },
            {
                "text": "Please check the spelling in this paragraph",
                "tier": "mini",
                "risk_state": "Harmony"
            }
        ]
    })
}

/// A request with its language and the fracture flag an engine loaded with
/// [`corpus_json`] must report for it.
#[derive(Debug, Clone, Copy)]
pub struct RequestFixture {
    pub text: &'static str,
    pub lang: Language,
    pub fracture: bool,
}

const fn req(text: &'static str, lang: Language, fracture: bool) -> RequestFixture {
    RequestFixture {
        text,
        lang,
        fracture,
    }
}

/// Requests covering every fallback feature combination in both languages.
pub const REQUESTS: &[RequestFixture] = &[
    req("", Language::En, false),
    req("hi", Language::En, false),
    req("What time is the standup today?", Language::En, false),
    req("Can you rewrite this paragraph so it reads more clearly for new staff?", Language::En, false),
    req("This treatment always cures everything", Language::En, false),
    req("This never works and it is not safe", Language::En, true),
    req("Never again", Language::En, true),
    req("I do not agree with the summary you gave me earlier today", Language::En, false),
    req("Revenue grew 12% in Q3 compared to the previous year", Language::En, false),
    req("We guarantee 100% uptime and it will not fail", Language::En, true),
    req("Review this contract clause for liability", Language::En, false),
    req("medical advice", Language::En, false),
    req("The financial plan is perfect", Language::En, false),
    req("It is not a cure", Language::En, true),
    req("Summarize the quarterly revenue figures for the board", Language::En, false),
    req("Thanks for the quick reply about the meeting room!", Language::En, false),
    req("It is never safe and this is not guaranteed to work", Language::En, true),
    req("안녕하세요", Language::Ko, false),
    req("오늘 회의 일정을 다시 확인해 주세요", Language::Ko, false),
    req("이 약은 절대 효과가 없다", Language::Ko, true),
    req("이 방법은 100% 보장되지 않는다", Language::Ko, true),
    req("계약서 조항을 검토해 주세요", Language::Ko, false),
    req("법적 책임이 없다고 말할 수 없다", Language::Ko, true),
    req("그 약을 먹으면 죽지 않는다", Language::Ko, true),
    req("3분기 매출은 12% 증가했다", Language::Ko, false),
];

/// `n` requests built by cycling [`REQUESTS`], each with a stable id.
pub fn request_set(n: usize) -> Vec<(String, RequestFixture)> {
    REQUESTS
        .iter()
        .cycle()
        .take(n)
        .enumerate()
        .map(|(i, r)| (format!("fixture_{i:04}"), *r))
        .collect()
}
