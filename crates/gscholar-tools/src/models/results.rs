//! Normalized result entities.
//!
//! These are the stable caller-facing shapes: once constructed by the
//! normalizer they are never mutated, cached, or shared across calls.
//! Serialization order matches the documented JSON result shape.

use serde::Serialize;

/// A normalized paper from a Scholar search.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Paper {
    /// Paper title.
    pub title: String,

    /// Author list as free text, exactly as the backend summary gave it.
    pub authors: String,

    /// Venue (journal, conference, or "arXiv ..."); "Unknown" if unparsable.
    pub venue: String,

    /// 4-digit publication year, or "Unknown".
    pub year: String,

    /// Abstract snippet, may be empty.
    pub snippet: String,

    /// Cited-by count, 0 when the backend reported none.
    pub citations: u32,

    /// Landing-page URL, may be empty.
    pub url: String,

    /// Direct PDF URL, may be empty.
    pub pdf_url: String,
}

/// Result of a paper search.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScholarResult {
    /// The query that produced this result.
    pub query: String,

    /// Number of papers returned (not the backend's global hit count).
    pub total_results: usize,

    /// Papers in backend relevance order, at most the requested count.
    #[serde(rename = "results")]
    pub papers: Vec<Paper>,

    /// Backend-reported error; when set, `papers` is empty and
    /// `total_results` is 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScholarResult {
    /// Build an error-only result for a failed search.
    #[must_use]
    pub fn error(query: impl Into<String>, message: impl Into<String>) -> Self {
        Self { query: query.into(), error: Some(message.into()), ..Self::default() }
    }
}

/// A normalized author (name search match or profile head).
#[derive(Debug, Clone, Default, Serialize)]
pub struct Author {
    /// Author display name.
    pub name: String,

    /// Google Scholar author ID, may be empty for unverified matches.
    pub author_id: String,

    /// Affiliation line, "Unknown" if absent.
    pub affiliation: String,

    /// Verified-email line (domain only), may be empty.
    pub email_domain: String,

    /// Total citation count.
    pub citations: u32,

    /// Research interests, may be empty. Full list; display truncation
    /// happens in the formatters.
    pub interests: Vec<String>,
}

/// Result of an author name search.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthorResult {
    /// The name that was searched for.
    pub author_name: String,

    /// Matching authors, at most 5.
    pub authors: Vec<Author>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuthorResult {
    /// Build an error-only result for a failed name search.
    #[must_use]
    pub fn error(author_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            author_name: author_name.into(),
            authors: Vec::new(),
            error: Some(message.into()),
        }
    }
}

/// One publication on an author profile.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Publication {
    pub title: String,

    /// Publication year as the backend gave it, "Unknown" if absent.
    pub year: String,

    pub citations: u32,
}

/// Result of an author profile lookup.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthorProfile {
    /// The Scholar author ID that was looked up.
    pub author_id: String,

    /// Exactly one author when found, empty otherwise.
    pub authors: Vec<Author>,

    pub h_index: u32,

    pub i10_index: u32,

    /// Top publications, at most 10.
    pub publications: Vec<Publication>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuthorProfile {
    /// Build an error-only result for a failed lookup.
    #[must_use]
    pub fn error(author_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self { author_id: author_id.into(), error: Some(message.into()), ..Self::default() }
    }

    /// The profiled author, when the lookup succeeded.
    #[must_use]
    pub fn author(&self) -> Option<&Author> {
        self.authors.first()
    }
}

/// A paper citing another paper. Citation listings carry no parsed
/// venue/year/citation count; `authors` is the raw summary string.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CitingPaper {
    pub title: String,
    pub authors: String,
    pub snippet: String,
    pub url: String,
}

/// Result of a citation lookup.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CitationResult {
    /// The citation ID that was looked up.
    pub citation_id: String,

    /// Papers citing the target, in backend relevance order.
    pub citing_papers: Vec<CitingPaper>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CitationResult {
    /// Build an error-only result.
    #[must_use]
    pub fn error(citation_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            citation_id: citation_id.into(),
            citing_papers: Vec::new(),
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scholar_result_error_invariant() {
        let result = ScholarResult::error("transformers", "quota exceeded");
        assert_eq!(result.error.as_deref(), Some("quota exceeded"));
        assert!(result.papers.is_empty());
        assert_eq!(result.total_results, 0);
    }

    #[test]
    fn test_scholar_result_serializes_stable_shape() {
        let result = ScholarResult {
            query: "q".to_string(),
            total_results: 1,
            papers: vec![Paper { title: "T".to_string(), ..Paper::default() }],
            error: None,
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["query"], "q");
        assert_eq!(value["total_results"], 1);
        assert_eq!(value["results"][0]["title"], "T");
        // error is omitted, not null
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_author_error_results_keep_identifiers() {
        let profile = AuthorProfile::error("JicYPdAAAAAJ", "timed out");
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["author_id"], "JicYPdAAAAAJ");
        assert_eq!(value["error"], "timed out");
        assert!(value["authors"].as_array().unwrap().is_empty());

        let result = AuthorResult::error("Geoffrey Hinton", "timed out");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["author_name"], "Geoffrey Hinton");
        assert_eq!(value["error"], "timed out");
    }

    #[test]
    fn test_author_profile_accessor() {
        let profile = AuthorProfile {
            authors: vec![Author { name: "Ada".to_string(), ..Author::default() }],
            ..AuthorProfile::default()
        };
        assert_eq!(profile.author().map(|a| a.name.as_str()), Some("Ada"));
        assert!(AuthorProfile::default().author().is_none());
    }
}
