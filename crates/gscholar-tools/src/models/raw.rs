//! Backend-shaped reply models for SerpAPI Google Scholar responses.
//!
//! Every field is `#[serde(default)]` so that partial or missing nesting
//! deserializes to zero values instead of failing. The accessors descend
//! the nested counters defensively and default to 0/empty.

use serde::Deserialize;

/// Raw reply for `google_scholar` searches (papers and citations).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawScholarReply {
    /// Backend-reported error message, if any.
    #[serde(default)]
    pub error: Option<String>,

    /// Organic search results in backend relevance order.
    #[serde(default)]
    pub organic_results: Vec<RawOrganicResult>,
}

/// One organic result entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOrganicResult {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub publication_info: RawPublicationInfo,

    #[serde(default)]
    pub snippet: Option<String>,

    #[serde(default)]
    pub link: Option<String>,

    #[serde(default)]
    pub inline_links: RawInlineLinks,

    /// Auxiliary resources (PDF mirrors etc.), first entry wins.
    #[serde(default)]
    pub resources: Vec<RawResource>,
}

impl RawOrganicResult {
    /// Cited-by total, defaulting to 0 for any missing nested path.
    #[must_use]
    pub fn cited_by_total(&self) -> u32 {
        self.inline_links.cited_by.as_ref().and_then(|c| c.total).unwrap_or(0)
    }

    /// First resource link, or empty string when no resources exist.
    #[must_use]
    pub fn first_resource_link(&self) -> &str {
        self.resources.first().and_then(|r| r.link.as_deref()).unwrap_or("")
    }
}

/// Publication info block carrying the free-text summary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPublicationInfo {
    /// Free-text summary, typically `"Authors - Venue, Year"`.
    #[serde(default)]
    pub summary: Option<String>,
}

/// Inline links block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawInlineLinks {
    #[serde(default)]
    pub cited_by: Option<RawCitedBy>,
}

/// Cited-by counter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCitedBy {
    #[serde(default)]
    pub total: Option<u32>,
}

/// A resource entry (e.g. a PDF mirror).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResource {
    #[serde(default)]
    pub link: Option<String>,
}

/// Raw reply for `google_scholar_author` profile lookups.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAuthorReply {
    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub author: RawAuthorInfo,

    #[serde(default)]
    pub cited_by: RawCitedByTable,

    #[serde(default)]
    pub articles: Vec<RawArticle>,
}

impl RawAuthorReply {
    /// First citation-table row, if the backend sent one.
    fn metrics_row(&self) -> Option<&RawMetricsRow> {
        self.cited_by.table.first()
    }

    /// All-time citation count, 0 when the table is missing or partial.
    #[must_use]
    pub fn citations_all(&self) -> u32 {
        self.metrics_row().and_then(|r| r.citations.as_ref()).and_then(|m| m.all).unwrap_or(0)
    }

    /// All-time h-index, defaulting to 0.
    #[must_use]
    pub fn h_index_all(&self) -> u32 {
        self.metrics_row().and_then(|r| r.h_index.as_ref()).and_then(|m| m.all).unwrap_or(0)
    }

    /// All-time i10-index, defaulting to 0.
    #[must_use]
    pub fn i10_index_all(&self) -> u32 {
        self.metrics_row().and_then(|r| r.i10_index.as_ref()).and_then(|m| m.all).unwrap_or(0)
    }
}

/// Author header block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAuthorInfo {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub affiliations: Option<String>,

    /// Verification line, e.g. "Verified email at cs.toronto.edu".
    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub interests: Vec<RawInterest>,
}

/// Citation metrics table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCitedByTable {
    /// Rows keyed by metric; the first row carries citations/h-index/i10-index.
    #[serde(default)]
    pub table: Vec<RawMetricsRow>,
}

/// One metrics-table row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMetricsRow {
    #[serde(default)]
    pub citations: Option<RawMetricValue>,

    #[serde(default)]
    pub h_index: Option<RawMetricValue>,

    #[serde(default)]
    pub i10_index: Option<RawMetricValue>,
}

/// All-time / recent metric pair; only "all" is consumed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMetricValue {
    #[serde(default)]
    pub all: Option<u32>,
}

/// One article on an author profile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArticle {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub year: Option<String>,

    #[serde(default)]
    pub cited_by: Option<RawArticleCitedBy>,
}

impl RawArticle {
    /// Citation count for this article, defaulting to 0.
    #[must_use]
    pub fn citations(&self) -> u32 {
        self.cited_by.as_ref().and_then(|c| c.value).unwrap_or(0)
    }
}

/// Per-article citation counter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArticleCitedBy {
    #[serde(default)]
    pub value: Option<u32>,
}

/// An interest tag; profile and author-search replies both use `{title}` objects.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawInterest {
    #[serde(default)]
    pub title: Option<String>,
}

/// Raw reply for `google_scholar_profiles` name searches.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProfilesReply {
    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub profiles: Vec<RawProfile>,
}

/// One matching author profile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProfile {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub author_id: Option<String>,

    #[serde(default)]
    pub affiliations: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub cited_by: Option<u32>,

    #[serde(default)]
    pub interests: Vec<RawInterest>,
}
