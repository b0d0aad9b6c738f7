//! Canonical tool operations and uniform execution.
//!
//! The four logical search operations are defined once, here, independent
//! of any provider's schema dialect. [`schema`] renders them per-dialect
//! and parses invocations back; [`action`] handles the free-text fallback
//! protocol for models without native tool calling.

pub mod action;
pub mod schema;

use serde_json::Value;

use crate::client::SerpApiClient;
use crate::error::ToolError;
use crate::formatters;
use crate::models::{
    AuthorProfile, AuthorResult, AuthorSearchArgs, CitationResult, CitationsArgs, ProfileArgs,
    ScholarResult, SearchArgs,
};

/// A canonical search operation, independent of provider dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Paper search across all publication types.
    SearchScholar,
    /// Papers citing a given paper.
    GetPaperCitations,
    /// Author profile by Scholar ID.
    GetAuthorProfile,
    /// Author lookup by name.
    SearchAuthor,
}

impl Operation {
    /// All operations, in tool-listing order.
    pub const ALL: [Self; 4] =
        [Self::SearchScholar, Self::GetPaperCitations, Self::GetAuthorProfile, Self::SearchAuthor];

    /// Wire-level tool name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SearchScholar => "search_scholar",
            Self::GetPaperCitations => "get_paper_citations",
            Self::GetAuthorProfile => "get_author_profile",
            Self::SearchAuthor => "search_author",
        }
    }

    /// Resolve a wire-level name back to an operation.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Validated arguments for one operation.
///
/// Parsing a provider invocation produces this tagged form, so dispatch
/// never re-inspects provider-shaped JSON.
#[derive(Debug, Clone)]
pub enum OperationArgs {
    Search(SearchArgs),
    Citations(CitationsArgs),
    Profile(ProfileArgs),
    AuthorSearch(AuthorSearchArgs),
}

impl OperationArgs {
    /// The operation these arguments belong to.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        match self {
            Self::Search(_) => Operation::SearchScholar,
            Self::Citations(_) => Operation::GetPaperCitations,
            Self::Profile(_) => Operation::GetAuthorProfile,
            Self::AuthorSearch(_) => Operation::SearchAuthor,
        }
    }

    /// Validate a raw argument object against an operation's typed form.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::MalformedArguments`] when required arguments
    /// are missing or of the wrong type.
    pub fn from_value(operation: Operation, arguments: Value) -> Result<Self, ToolError> {
        let malformed = |e: serde_json::Error| ToolError::malformed(operation.name(), e.to_string());

        match operation {
            Operation::SearchScholar => {
                Ok(Self::Search(serde_json::from_value(arguments).map_err(malformed)?))
            }
            Operation::GetPaperCitations => {
                Ok(Self::Citations(serde_json::from_value(arguments).map_err(malformed)?))
            }
            Operation::GetAuthorProfile => {
                Ok(Self::Profile(serde_json::from_value(arguments).map_err(malformed)?))
            }
            Operation::SearchAuthor => {
                Ok(Self::AuthorSearch(serde_json::from_value(arguments).map_err(malformed)?))
            }
        }
    }
}

/// A canonical tool invocation: operation plus validated arguments, with
/// the provider's call ID when one was given.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Provider-assigned call ID, echoed back in the result envelope.
    pub id: Option<String>,

    /// Operation and validated arguments.
    pub args: OperationArgs,
}

/// One parameter of a canonical tool description.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    /// JSON Schema type name ("string" or "integer").
    pub kind: &'static str,
    pub description: &'static str,
    pub required: bool,
}

/// Canonical description of one operation: the single source of truth the
/// dialect adapters render from.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    pub operation: Operation,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
}

const NUM_RESULTS_PARAM: ParamSpec = ParamSpec {
    name: "num_results",
    kind: "integer",
    description: "Maximum number of results to return (1-20, default 5)",
    required: false,
};

/// Canonical specs for all four operations.
#[must_use]
pub fn canonical_specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            operation: Operation::SearchScholar,
            description: "Search Google Scholar for academic literature across all publication \
                          types: journal articles, conference proceedings, preprints (arXiv, \
                          bioRxiv), technical reports, theses, and books. Add 'arxiv' or a \
                          conference name to the query to narrow the publication type.",
            params: &[
                ParamSpec {
                    name: "query",
                    kind: "string",
                    description: "Search query, e.g. 'retrieval augmented generation'",
                    required: true,
                },
                NUM_RESULTS_PARAM,
                ParamSpec {
                    name: "year_from",
                    kind: "integer",
                    description: "Only papers published from this year onwards (inclusive)",
                    required: false,
                },
                ParamSpec {
                    name: "year_to",
                    kind: "integer",
                    description: "Only papers published until this year (inclusive)",
                    required: false,
                },
            ],
        },
        ToolSpec {
            operation: Operation::GetPaperCitations,
            description: "Get papers that cite a given paper, using the citation ID from a \
                          previous search result.",
            params: &[
                ParamSpec {
                    name: "citation_id",
                    kind: "string",
                    description: "Citation ID from a previous search result",
                    required: true,
                },
                NUM_RESULTS_PARAM,
            ],
        },
        ToolSpec {
            operation: Operation::GetAuthorProfile,
            description: "Get an author's Google Scholar profile by author ID, including \
                          affiliation, total citations, h-index, i10-index, and top publications.",
            params: &[ParamSpec {
                name: "author_id",
                kind: "string",
                description: "Google Scholar author ID, e.g. 'JicYPdAAAAAJ'",
                required: true,
            }],
        },
        ToolSpec {
            operation: Operation::SearchAuthor,
            description: "Search for an author by name to find their Google Scholar author ID \
                          and basic profile information.",
            params: &[ParamSpec {
                name: "author_name",
                kind: "string",
                description: "Name of the author, e.g. 'Geoffrey Hinton'",
                required: true,
            }],
        },
    ]
}

/// Execute validated arguments against the gateway and return the
/// normalized result as a JSON string.
///
/// All failures — missing credential, transport, backend-reported — come
/// back as an error-carrying result entity, never as a panic or a crashed
/// conversation. The entity always names the operation's identifying
/// parameter so the error can be echoed to the caller.
pub async fn execute(client: &SerpApiClient, args: &OperationArgs) -> String {
    let rendered = match args {
        OperationArgs::Search(search) => {
            let result = run_search(client, search).await;
            formatters::to_json(&result)
        }
        OperationArgs::Citations(citations) => {
            let result = run_citations(client, citations).await;
            formatters::to_json(&result)
        }
        OperationArgs::Profile(profile) => {
            let result = run_profile(client, profile).await;
            formatters::to_json(&result)
        }
        OperationArgs::AuthorSearch(author_search) => {
            let result = run_author_search(client, author_search).await;
            formatters::to_json(&result)
        }
    };

    rendered.unwrap_or_else(|e| format!(r#"{{"error": "{e}"}}"#))
}

/// Run a paper search end to end (gateway + normalizer).
pub async fn run_search(client: &SerpApiClient, args: &SearchArgs) -> ScholarResult {
    match client
        .fetch_papers(&args.query, args.year_from, args.year_to, args.num_results)
        .await
    {
        Ok(reply) => crate::normalizer::normalize_search(
            &args.query,
            crate::config::clamp_num_results(args.num_results),
            &reply,
        ),
        Err(e) => {
            tracing::error!(query = %args.query, error = %e, "Paper search failed");
            ScholarResult::error(&args.query, e.to_string())
        }
    }
}

/// Run a citation lookup end to end.
pub async fn run_citations(client: &SerpApiClient, args: &CitationsArgs) -> CitationResult {
    match client.fetch_citing_papers(&args.citation_id, args.num_results).await {
        Ok(reply) => crate::normalizer::normalize_citations(
            &args.citation_id,
            crate::config::clamp_num_results(args.num_results),
            &reply,
        ),
        Err(e) => {
            tracing::error!(citation_id = %args.citation_id, error = %e, "Citation lookup failed");
            CitationResult::error(&args.citation_id, e.to_string())
        }
    }
}

/// Run an author profile lookup end to end.
pub async fn run_profile(client: &SerpApiClient, args: &ProfileArgs) -> AuthorProfile {
    match client.fetch_author_profile(&args.author_id).await {
        Ok(reply) => crate::normalizer::normalize_profile(&args.author_id, &reply),
        Err(e) => {
            tracing::error!(author_id = %args.author_id, error = %e, "Profile lookup failed");
            AuthorProfile::error(&args.author_id, e.to_string())
        }
    }
}

/// Run an author name search end to end.
pub async fn run_author_search(client: &SerpApiClient, args: &AuthorSearchArgs) -> AuthorResult {
    match client.fetch_authors_by_name(&args.author_name).await {
        Ok(reply) => crate::normalizer::normalize_author_search(&args.author_name, &reply),
        Err(e) => {
            tracing::error!(author_name = %args.author_name, error = %e, "Author search failed");
            AuthorResult::error(&args.author_name, e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_name_round_trip() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_name(op.name()), Some(op));
        }
        assert_eq!(Operation::from_name("delete_papers"), None);
    }

    #[test]
    fn test_args_validation() {
        let args = OperationArgs::from_value(
            Operation::SearchScholar,
            json!({"query": "rag", "num_results": 3}),
        )
        .unwrap();
        assert_eq!(args.operation(), Operation::SearchScholar);

        let err = OperationArgs::from_value(Operation::SearchScholar, json!({})).unwrap_err();
        assert!(matches!(err, ToolError::MalformedArguments { .. }));

        let err = OperationArgs::from_value(
            Operation::GetAuthorProfile,
            json!({"author_id": 42}),
        )
        .unwrap_err();
        assert!(matches!(err, ToolError::MalformedArguments { .. }));
    }

    #[test]
    fn test_canonical_specs_cover_all_operations() {
        let specs = canonical_specs();
        assert_eq!(specs.len(), Operation::ALL.len());
        for (spec, op) in specs.iter().zip(Operation::ALL) {
            assert_eq!(spec.operation, op);
            assert!(!spec.params.is_empty());
        }
    }

    #[tokio::test]
    async fn test_execute_without_credential_yields_error_entity() {
        let client =
            SerpApiClient::new(crate::config::Config::new(None)).unwrap();
        let args = OperationArgs::Search(SearchArgs {
            query: "rag".to_string(),
            num_results: 5,
            year_from: None,
            year_to: None,
        });

        let output = execute(&client, &args).await;
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(value["error"].as_str().unwrap().contains("SERPAPI_KEY"));
        assert_eq!(value["query"], "rag");
        assert_eq!(value["total_results"], 0);
    }
}
