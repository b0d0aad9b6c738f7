//! Configuration for the SerpAPI gateway.
//!
//! The API key lives in an explicit `Config` value passed to the client,
//! not in process-wide state. Building a new `Config` replaces the key
//! silently; no format validation is performed.

use std::time::Duration;

/// API constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for the SerpAPI search endpoint.
    pub const BASE_URL: &str = "https://serpapi.com";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Result count bounds enforced before every paper/citation request.
    pub const MIN_RESULTS: u32 = 1;

    /// Upper bound on requested results per call.
    pub const MAX_RESULTS: u32 = 20;

    /// Default result count when the caller does not specify one.
    pub const DEFAULT_RESULTS: u32 = 5;

    /// Maximum authors returned by a name search.
    pub const MAX_AUTHOR_MATCHES: usize = 5;

    /// Maximum publications kept on an author profile.
    pub const MAX_PROFILE_PUBLICATIONS: usize = 10;
}

/// SerpAPI engine discriminators, one per logical operation group.
pub mod engines {
    /// Paper and citation search.
    pub const SCHOLAR: &str = "google_scholar";

    /// Author profile lookup.
    pub const SCHOLAR_AUTHOR: &str = "google_scholar_author";

    /// Author name search.
    pub const SCHOLAR_PROFILES: &str = "google_scholar_profiles";
}

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// SerpAPI key. Operations fail with `MissingCredential` when absent.
    pub api_key: Option<String>,

    /// Base URL (overridable for testing with mock servers).
    pub base_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,
}

impl Config {
    /// Create a new configuration with an optional API key.
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: api::BASE_URL.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
        }
    }

    /// Create a test configuration pointed at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_key: Some("test-key".to_string()),
            base_url: base_url.to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
        }
    }

    /// Create configuration from the `SERPAPI_KEY` environment variable.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(std::env::var("SERPAPI_KEY").ok())
    }

    /// Check if an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Clamp a requested result count to the backend's accepted range.
///
/// Silent policy, not an error: 0 and negative values become 1,
/// anything above 20 becomes 20.
#[must_use]
pub fn clamp_num_results(requested: i64) -> u32 {
    requested.clamp(i64::from(api::MIN_RESULTS), i64::from(api::MAX_RESULTS)) as u32
}
