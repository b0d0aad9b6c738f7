//! Typed argument structs for the canonical tool operations.
//!
//! Field names match the wire-level tool schemas (snake_case). Optional
//! parameters use `#[serde(default)]` so providers may omit them.

use serde::{Deserialize, Serialize};

/// Arguments for `search_scholar`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchArgs {
    /// Search query.
    pub query: String,

    /// Maximum papers to return (clamped to 1-20 by the gateway).
    #[serde(default = "default_num_results")]
    pub num_results: i64,

    /// Only papers published from this year onwards (inclusive).
    #[serde(default)]
    pub year_from: Option<i32>,

    /// Only papers published until this year (inclusive).
    #[serde(default)]
    pub year_to: Option<i32>,
}

/// Arguments for `get_paper_citations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitationsArgs {
    /// Citation ID from a previous search result.
    pub citation_id: String,

    /// Maximum citing papers to return.
    #[serde(default = "default_num_results")]
    pub num_results: i64,
}

/// Arguments for `get_author_profile`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileArgs {
    /// Google Scholar author ID (e.g. "JicYPdAAAAAJ").
    pub author_id: String,
}

/// Arguments for `search_author`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorSearchArgs {
    /// Name of the author to search for.
    pub author_name: String,
}

impl Default for SearchArgs {
    fn default() -> Self {
        Self {
            query: String::new(),
            num_results: default_num_results(),
            year_from: None,
            year_to: None,
        }
    }
}

fn default_num_results() -> i64 {
    i64::from(crate::config::api::DEFAULT_RESULTS)
}
