//! Error types for the Scholar tool layer.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.
//!
//! Backend-reported errors (SerpAPI answering with its own `error` payload) are
//! NOT represented here: they are data, carried in the `error` field of the
//! normalized result entities. These types cover transport-level failures and
//! tool-invocation parsing failures only.

use std::time::Duration;

/// Errors from the SerpAPI gateway layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// No API key configured. The operation is not attempted.
    #[error("no SerpAPI key configured; set SERPAPI_KEY or pass --api-key")]
    MissingCredential,

    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// Request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create an unexpected-status error.
    #[must_use]
    pub fn unexpected_status(status: u16, message: impl Into<String>) -> Self {
        Self::UnexpectedStatus { status, message: message.into() }
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::UnexpectedStatus { status: 500..=599, .. })
    }
}

/// Errors from tool-invocation handling.
#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    /// Error from the API client
    #[error("API error: {0}")]
    Client(#[from] ClientError),

    /// Tool name does not match any canonical operation
    #[error("unrecognized operation: {name}")]
    UnrecognizedOperation {
        /// The name the provider sent
        name: String,
    },

    /// Required arguments missing or of the wrong type
    #[error("malformed arguments for {operation}: {message}")]
    MalformedArguments {
        /// Canonical operation name
        operation: String,
        /// What was wrong with the arguments
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ToolError {
    /// Create an unrecognized-operation error.
    #[must_use]
    pub fn unrecognized(name: impl Into<String>) -> Self {
        Self::UnrecognizedOperation { name: name.into() }
    }

    /// Create a malformed-arguments error.
    #[must_use]
    pub fn malformed(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedArguments { operation: operation.into(), message: message.into() }
    }

    /// Convert to a message suitable for feeding back into a conversation
    /// as a failed tool result.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::UnrecognizedOperation { name } => {
                format!("Tool '{name}' does not exist. Available tools: search_scholar, get_paper_citations, get_author_profile, search_author.")
            }
            Self::MalformedArguments { operation, message } => {
                format!("Invalid arguments for '{operation}': {message}")
            }
            _ => self.to_string(),
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_retryable() {
        assert!(ClientError::Timeout(Duration::from_secs(30)).is_retryable());
        assert!(ClientError::unexpected_status(502, "bad gateway").is_retryable());

        assert!(!ClientError::MissingCredential.is_retryable());
        assert!(!ClientError::unexpected_status(403, "forbidden").is_retryable());
    }

    #[test]
    fn test_tool_error_user_message() {
        let err = ToolError::unrecognized("delete_papers");
        assert!(err.to_user_message().contains("delete_papers"));
        assert!(err.to_user_message().contains("search_scholar"));

        let err = ToolError::malformed("search_scholar", "missing field `query`");
        assert!(err.to_user_message().contains("search_scholar"));
        assert!(err.to_user_message().contains("query"));
    }
}
