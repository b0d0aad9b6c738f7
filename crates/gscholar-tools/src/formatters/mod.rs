//! Output formatting for terminal display, model-facing text, and JSON.
//!
//! Truncation is a presentation policy and lives here, not in the
//! normalizer: the JSON channel always serializes full entities, while the
//! text channels trim interests, publication lists, and snippets for
//! readability and token economy.

use std::borrow::Cow;
use std::fmt::Write as _;

use serde::Serialize;

use crate::error::ToolResult;
use crate::models::{AuthorProfile, AuthorResult, CitationResult, ScholarResult};

/// Presentation limits, applied at formatting time only.
pub mod limits {
    /// Snippet length in the model-facing free-text flow.
    pub const SNIPPET_CHARS: usize = 200;

    /// Interests shown per author in text output.
    pub const INTERESTS_SHOWN: usize = 5;

    /// Publications shown per profile in text output.
    pub const PUBLICATIONS_SHOWN: usize = 5;
}

/// Serialize a result entity to pretty JSON, untruncated.
///
/// This is the stable structured output path; callers wanting the full
/// data always go through here.
pub fn to_json<T: Serialize>(value: &T) -> ToolResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Truncate a snippet on a character boundary, appending an ellipsis.
#[must_use]
pub fn truncate_snippet(snippet: &str) -> Cow<'_, str> {
    if snippet.chars().count() <= limits::SNIPPET_CHARS {
        Cow::Borrowed(snippet)
    } else {
        let cut: String = snippet.chars().take(limits::SNIPPET_CHARS).collect();
        Cow::Owned(format!("{cut}..."))
    }
}

/// Format search results for feeding back into a model conversation.
///
/// Field order is fixed: title, authors, venue (year), citations, URL,
/// summary. Snippets are truncated to 200 characters in this flow only.
#[must_use]
pub fn format_search_for_model(result: &ScholarResult) -> String {
    if let Some(error) = &result.error {
        return format!("Search error: {error}");
    }

    let mut output = format!("Found {} papers:\n\n", result.total_results);
    for (i, paper) in result.papers.iter().enumerate() {
        let _ = writeln!(output, "{}. {}", i + 1, paper.title);
        let _ = writeln!(output, "   Authors: {}", paper.authors);
        let _ = writeln!(output, "   Venue: {} ({})", paper.venue, paper.year);
        let _ = writeln!(output, "   Citations: {}", paper.citations);
        if !paper.url.is_empty() {
            let _ = writeln!(output, "   URL: {}", paper.url);
        }
        if !paper.snippet.is_empty() {
            let _ = writeln!(output, "   Summary: {}", truncate_snippet(&paper.snippet));
        }
        output.push('\n');
    }
    output
}

/// Format search results for terminal display.
#[must_use]
pub fn format_search(result: &ScholarResult) -> String {
    if let Some(error) = &result.error {
        return format!("Error: {error}");
    }

    let mut output =
        format!("\nFound {} papers for: {}\n\n", result.total_results, result.query);
    output.push_str(&"=".repeat(70));
    output.push('\n');

    for (i, paper) in result.papers.iter().enumerate() {
        let _ = writeln!(output, "\n{}. {}", i + 1, paper.title);
        let _ = writeln!(output, "   Authors: {}", paper.authors);
        let _ = writeln!(output, "   Venue: {} ({})", paper.venue, paper.year);
        let _ = writeln!(output, "   Citations: {}", paper.citations);
        if !paper.url.is_empty() {
            let _ = writeln!(output, "   URL: {}", paper.url);
        }
        if !paper.pdf_url.is_empty() {
            let _ = writeln!(output, "   PDF: {}", paper.pdf_url);
        }
    }
    output
}

/// Format author name-search matches for terminal display.
#[must_use]
pub fn format_author_search(result: &AuthorResult) -> String {
    if let Some(error) = &result.error {
        return format!("Error: {error}");
    }
    if result.authors.is_empty() {
        return "No matching authors found.".to_string();
    }

    let mut output = String::new();
    for author in &result.authors {
        let _ = writeln!(output, "\nName: {}", author.name);
        let _ = writeln!(output, "  ID: {}", author.author_id);
        let _ = writeln!(output, "  Affiliation: {}", author.affiliation);
        let _ = writeln!(output, "  Citations: {}", author.citations);
        if !author.interests.is_empty() {
            let shown: Vec<&str> = author
                .interests
                .iter()
                .take(limits::INTERESTS_SHOWN)
                .map(String::as_str)
                .collect();
            let _ = writeln!(output, "  Interests: {}", shown.join(", "));
        }
    }
    output
}

/// Format an author profile for terminal display.
#[must_use]
pub fn format_profile(result: &AuthorProfile) -> String {
    if let Some(error) = &result.error {
        return format!("Error: {error}");
    }
    let Some(author) = result.author() else {
        return "Author not found.".to_string();
    };

    let mut output = format!("\n{}\n", author.name);
    output.push_str(&"=".repeat(70));
    output.push('\n');
    let _ = writeln!(output, "Affiliation: {}", author.affiliation);
    let _ = writeln!(output, "Total Citations: {}", author.citations);
    let _ = writeln!(output, "h-index: {}", result.h_index);
    let _ = writeln!(output, "i10-index: {}", result.i10_index);

    if !author.interests.is_empty() {
        let shown: Vec<&str> = author
            .interests
            .iter()
            .take(limits::INTERESTS_SHOWN)
            .map(String::as_str)
            .collect();
        let _ = writeln!(output, "Interests: {}", shown.join(", "));
    }

    if !result.publications.is_empty() {
        output.push_str("\nTop Publications:\n");
        for publication in result.publications.iter().take(limits::PUBLICATIONS_SHOWN) {
            let _ = writeln!(
                output,
                "  - {} ({}) - {} citations",
                publication.title, publication.year, publication.citations
            );
        }
    }
    output
}

/// Format citing papers for terminal display.
#[must_use]
pub fn format_citations(result: &CitationResult) -> String {
    if let Some(error) = &result.error {
        return format!("Error: {error}");
    }

    let mut output = format!("\nPapers citing: {}\n", result.citation_id);
    output.push_str(&"=".repeat(70));
    output.push('\n');

    for (i, paper) in result.citing_papers.iter().enumerate() {
        let _ = writeln!(output, "\n{}. {}", i + 1, paper.title);
        let _ = writeln!(output, "   Authors: {}", paper.authors);
        if !paper.url.is_empty() {
            let _ = writeln!(output, "   URL: {}", paper.url);
        }
    }
    output
}
