//! Result normalization: raw SerpAPI replies into stable typed entities.
//!
//! Backend summaries are loosely structured free text; everything here is
//! best-effort parsing that degrades to "Unknown" / zero values rather than
//! failing. When the backend reply carries its own `error` payload, no
//! further parsing is attempted and an error-only entity is returned.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::api;
use crate::models::raw::{RawAuthorReply, RawProfilesReply, RawScholarReply};
use crate::models::{
    Author, AuthorProfile, AuthorResult, CitationResult, CitingPaper, Paper, Publication,
    ScholarResult,
};

/// Placeholder for fields the summary did not yield.
pub const UNKNOWN: &str = "Unknown";

/// 4-digit year beginning with 19 or 20.
static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(19|20)\d{2}\b").expect("valid year regex"));

/// Parsed pieces of a publication-info summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryParts {
    /// Author list as free text.
    pub authors: String,

    /// Venue, or "Unknown".
    pub venue: String,

    /// 4-digit year, or "Unknown".
    pub year: String,
}

/// Parse a `"Authors - Venue, Year"` summary string.
///
/// Splits once on the literal `" - "` separator. Without a separator the
/// whole string is the author list and venue/year stay unknown. The year is
/// the first 4-digit substring starting with 19 or 20 in the remainder; the
/// venue is the remainder with its trailing `", <year>"` segment stripped
/// when a comma is present.
#[must_use]
pub fn parse_summary(summary: &str) -> SummaryParts {
    let Some((authors, venue_year)) = summary.split_once(" - ") else {
        return SummaryParts {
            authors: summary.to_string(),
            venue: UNKNOWN.to_string(),
            year: UNKNOWN.to_string(),
        };
    };

    let year = YEAR_RE
        .find(venue_year)
        .map_or_else(|| UNKNOWN.to_string(), |m| m.as_str().to_string());

    let venue = match venue_year.rsplit_once(',') {
        Some((before, _)) => before.trim().to_string(),
        None => venue_year.trim().to_string(),
    };
    let venue = if venue.is_empty() { UNKNOWN.to_string() } else { venue };

    SummaryParts { authors: authors.to_string(), venue, year }
}

/// Normalize a paper-search reply.
///
/// `limit` bounds the number of papers kept; order is backend relevance
/// order. A backend error payload short-circuits into an error-only result.
#[must_use]
pub fn normalize_search(query: &str, limit: u32, reply: &RawScholarReply) -> ScholarResult {
    if let Some(error) = &reply.error {
        return ScholarResult::error(query, error);
    }

    let papers: Vec<Paper> = reply
        .organic_results
        .iter()
        .take(limit as usize)
        .map(|result| {
            let summary = result.publication_info.summary.as_deref().unwrap_or("");
            let parts = parse_summary(summary);

            Paper {
                title: result.title.clone().unwrap_or_else(|| UNKNOWN.to_string()),
                authors: parts.authors,
                venue: parts.venue,
                year: parts.year,
                snippet: result.snippet.clone().unwrap_or_default(),
                citations: result.cited_by_total(),
                url: result.link.clone().unwrap_or_default(),
                pdf_url: result.first_resource_link().to_string(),
            }
        })
        .collect();

    ScholarResult {
        query: query.to_string(),
        total_results: papers.len(),
        papers,
        error: None,
    }
}

/// Normalize a citation-lookup reply.
///
/// Citing papers keep the whole summary string as `authors`; no venue/year
/// parsing is attempted for citation listings.
#[must_use]
pub fn normalize_citations(
    citation_id: &str,
    limit: u32,
    reply: &RawScholarReply,
) -> CitationResult {
    if let Some(error) = &reply.error {
        return CitationResult::error(citation_id, error);
    }

    let citing_papers = reply
        .organic_results
        .iter()
        .take(limit as usize)
        .map(|result| CitingPaper {
            title: result.title.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            authors: result
                .publication_info
                .summary
                .clone()
                .unwrap_or_else(|| UNKNOWN.to_string()),
            snippet: result.snippet.clone().unwrap_or_default(),
            url: result.link.clone().unwrap_or_default(),
        })
        .collect();

    CitationResult { citation_id: citation_id.to_string(), citing_papers, error: None }
}

/// Normalize an author-profile reply.
#[must_use]
pub fn normalize_profile(author_id: &str, reply: &RawAuthorReply) -> AuthorProfile {
    if let Some(error) = &reply.error {
        return AuthorProfile::error(author_id, error);
    }

    let author = Author {
        name: reply.author.name.clone().unwrap_or_else(|| UNKNOWN.to_string()),
        author_id: author_id.to_string(),
        affiliation: reply.author.affiliations.clone().unwrap_or_else(|| UNKNOWN.to_string()),
        email_domain: reply.author.email.clone().unwrap_or_default(),
        citations: reply.citations_all(),
        interests: reply
            .author
            .interests
            .iter()
            .filter_map(|i| i.title.clone())
            .collect(),
    };

    let publications = reply
        .articles
        .iter()
        .take(api::MAX_PROFILE_PUBLICATIONS)
        .map(|article| Publication {
            title: article.title.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            year: article.year.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            citations: article.citations(),
        })
        .collect();

    AuthorProfile {
        author_id: author_id.to_string(),
        authors: vec![author],
        h_index: reply.h_index_all(),
        i10_index: reply.i10_index_all(),
        publications,
        error: None,
    }
}

/// Normalize an author name-search reply. Keeps at most 5 matches.
#[must_use]
pub fn normalize_author_search(author_name: &str, reply: &RawProfilesReply) -> AuthorResult {
    if let Some(error) = &reply.error {
        return AuthorResult::error(author_name, error);
    }

    let authors = reply
        .profiles
        .iter()
        .take(api::MAX_AUTHOR_MATCHES)
        .map(|profile| Author {
            name: profile.name.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            author_id: profile.author_id.clone().unwrap_or_default(),
            affiliation: profile.affiliations.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            email_domain: profile.email.clone().unwrap_or_default(),
            citations: profile.cited_by.unwrap_or(0),
            interests: profile.interests.iter().filter_map(|i| i.title.clone()).collect(),
        })
        .collect();

    AuthorResult { author_name: author_name.to_string(), authors, error: None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_summary_full() {
        let parts = parse_summary("A, B - Conf X, 2023");
        assert_eq!(parts.authors, "A, B");
        assert_eq!(parts.venue, "Conf X");
        assert_eq!(parts.year, "2023");
    }

    #[test]
    fn test_parse_summary_no_separator() {
        let parts = parse_summary("J Smith, K Jones");
        assert_eq!(parts.authors, "J Smith, K Jones");
        assert_eq!(parts.venue, UNKNOWN);
        assert_eq!(parts.year, UNKNOWN);
    }

    #[test]
    fn test_parse_summary_no_comma_in_remainder() {
        let parts = parse_summary("A Vaswani - arXiv preprint 2017");
        assert_eq!(parts.authors, "A Vaswani");
        assert_eq!(parts.venue, "arXiv preprint 2017");
        assert_eq!(parts.year, "2017");
    }

    #[test]
    fn test_parse_summary_no_year() {
        let parts = parse_summary("A Author - Some Journal, forthcoming");
        assert_eq!(parts.venue, "Some Journal");
        assert_eq!(parts.year, UNKNOWN);
    }

    #[test]
    fn test_parse_summary_rejects_non_publication_years() {
        // 4-digit numbers outside 19xx/20xx are not years
        let parts = parse_summary("A - Journal of Numbers, 3456");
        assert_eq!(parts.year, UNKNOWN);
    }

    #[test]
    fn test_parse_summary_empty() {
        let parts = parse_summary("");
        assert_eq!(parts.authors, "");
        assert_eq!(parts.venue, UNKNOWN);
        assert_eq!(parts.year, UNKNOWN);
    }

    #[test]
    fn test_normalize_search_error_short_circuit() {
        let reply: RawScholarReply =
            serde_json::from_str(r#"{"error": "quota exceeded"}"#).unwrap();
        let result = normalize_search("transformers", 5, &reply);
        assert_eq!(result.error.as_deref(), Some("quota exceeded"));
        assert_eq!(result.query, "transformers");
        assert!(result.papers.is_empty());
        assert_eq!(result.total_results, 0);
    }

    #[test]
    fn test_normalize_search_truncates_to_limit() {
        let reply: RawScholarReply = serde_json::from_str(
            r#"{"organic_results": [{"title": "A"}, {"title": "B"}, {"title": "C"}]}"#,
        )
        .unwrap();
        let result = normalize_search("q", 2, &reply);
        assert_eq!(result.total_results, 2);
        assert_eq!(result.papers[0].title, "A");
        assert_eq!(result.papers[1].title, "B");
    }

    #[test]
    fn test_normalize_citations_keeps_raw_summary() {
        let reply: RawScholarReply = serde_json::from_str(
            r#"{"organic_results": [{
                "title": "Citing Paper",
                "publication_info": {"summary": "X, Y - NeurIPS, 2022"},
                "link": "http://x"
            }]}"#,
        )
        .unwrap();
        let result = normalize_citations("123", 5, &reply);
        assert_eq!(result.citing_papers.len(), 1);
        assert_eq!(result.citing_papers[0].authors, "X, Y - NeurIPS, 2022");
        assert_eq!(result.citing_papers[0].url, "http://x");
    }

    #[test]
    fn test_normalize_profile_caps_publications() {
        let articles: Vec<String> = (0..15)
            .map(|i| format!(r#"{{"title": "Paper {i}", "year": "2020"}}"#))
            .collect();
        let json = format!(
            r#"{{"author": {{"name": "Ada"}}, "articles": [{}]}}"#,
            articles.join(",")
        );
        let reply: RawAuthorReply = serde_json::from_str(&json).unwrap();
        let profile = normalize_profile("abc", &reply);
        assert_eq!(profile.author_id, "abc");
        assert_eq!(profile.publications.len(), 10);
        assert_eq!(profile.author().unwrap().name, "Ada");
        assert_eq!(profile.author().unwrap().author_id, "abc");
    }

    #[test]
    fn test_normalize_author_search_caps_matches() {
        let profiles: Vec<String> =
            (0..8).map(|i| format!(r#"{{"name": "Author {i}"}}"#)).collect();
        let json = format!(r#"{{"profiles": [{}]}}"#, profiles.join(","));
        let reply: RawProfilesReply = serde_json::from_str(&json).unwrap();
        let result = normalize_author_search("Author", &reply);
        assert_eq!(result.authors.len(), 5);
        assert_eq!(result.author_name, "Author");
    }

    #[test]
    fn test_normalize_profile_error_keeps_author_id() {
        let reply: RawAuthorReply =
            serde_json::from_str(r#"{"error": "quota exceeded"}"#).unwrap();
        let profile = normalize_profile("JicYPdAAAAAJ", &reply);
        assert_eq!(profile.error.as_deref(), Some("quota exceeded"));
        assert_eq!(profile.author_id, "JicYPdAAAAAJ");
        assert!(profile.authors.is_empty());
    }

    #[test]
    fn test_normalize_author_search_error_keeps_name() {
        let reply: RawProfilesReply =
            serde_json::from_str(r#"{"error": "quota exceeded"}"#).unwrap();
        let result = normalize_author_search("Geoffrey Hinton", &reply);
        assert_eq!(result.error.as_deref(), Some("quota exceeded"));
        assert_eq!(result.author_name, "Geoffrey Hinton");
        assert!(result.authors.is_empty());
    }

    #[test]
    fn test_normalize_author_search_flattens_interests() {
        let reply: RawProfilesReply = serde_json::from_str(
            r#"{"profiles": [{
                "name": "Geoffrey Hinton",
                "author_id": "JicYPdAAAAAJ",
                "cited_by": 800000,
                "interests": [{"title": "machine learning"}, {"title": "neural networks"}]
            }]}"#,
        )
        .unwrap();
        let result = normalize_author_search("Geoffrey Hinton", &reply);
        assert_eq!(
            result.authors[0].interests,
            vec!["machine learning".to_string(), "neural networks".to_string()]
        );
        assert_eq!(result.authors[0].citations, 800_000);
    }
}
