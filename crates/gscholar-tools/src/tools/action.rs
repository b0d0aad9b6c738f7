//! Free-text action protocol for models without native tool calling.
//!
//! Such models are prompted to emit a JSON object like
//! `{"action": "search", "query": "...", "num_results": 5}` in their text
//! output. Extraction precedence is fixed: a fenced code block first, then
//! a bare brace-delimited object containing the key `"action"`. Extraction
//! failure means "no tool request was made" — it is never an error.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::models::SearchArgs;

static FENCED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(\{[^`]+\})\s*```").expect("valid fenced-block regex")
});

static BARE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\{[^{}]*"action"[^{}]*\}"#).expect("valid bare-object regex"));

/// A search request embedded in model text.
///
/// `action` currently only takes the value `"search"`; anything else is
/// treated as no request.
#[derive(Debug, Clone, Deserialize)]
pub struct ScholarAction {
    pub action: String,

    #[serde(default)]
    pub query: String,

    #[serde(default = "default_num_results")]
    pub num_results: i64,

    #[serde(default)]
    pub year_from: Option<i32>,

    #[serde(default)]
    pub year_to: Option<i32>,
}

fn default_num_results() -> i64 {
    i64::from(crate::config::api::DEFAULT_RESULTS)
}

impl ScholarAction {
    /// Convert into canonical search arguments.
    #[must_use]
    pub fn into_search_args(self) -> SearchArgs {
        SearchArgs {
            query: self.query,
            num_results: self.num_results,
            year_from: self.year_from,
            year_to: self.year_to,
        }
    }
}

/// Extract a search action from model text, if one is present.
///
/// Tries a fenced ```json block first; if none matches or its contents do
/// not parse, falls through to a bare object containing `"action"`. A
/// candidate that parses to a non-"search" action yields `None`.
#[must_use]
pub fn extract_action(text: &str) -> Option<ScholarAction> {
    let fenced = FENCED_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| serde_json::from_str::<ScholarAction>(m.as_str()).ok());

    let action = fenced.or_else(|| {
        let bare = BARE_RE.find(text)?;
        serde_json::from_str(bare.as_str()).ok()
    })?;

    (action.action == "search").then_some(action)
}
