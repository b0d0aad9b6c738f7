//! SerpAPI gateway for Google Scholar.
//!
//! One request per logical operation, built on reqwest with retry
//! middleware. Each method returns the raw, backend-shaped reply; result
//! normalization happens in [`crate::normalizer`]. Backend-reported error
//! payloads are carried inside the raw reply, not raised — only
//! transport-level failures produce a [`ClientError`].

use std::time::Duration;

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

use crate::config::{Config, clamp_num_results, engines};
use crate::error::{ClientError, ClientResult};
use crate::models::raw::{RawAuthorReply, RawProfilesReply, RawScholarReply};

/// SerpAPI Google Scholar client.
#[derive(Clone)]
pub struct SerpApiClient {
    /// HTTP client with retry middleware.
    client: ClientWithMiddleware,

    /// API key; operations fail early when absent.
    api_key: Option<String>,

    /// Search endpoint URL.
    search_url: String,
}

impl SerpApiClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .build()?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_secs(1), Duration::from_secs(10))
            .build_with_max_retries(2);

        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            api_key: config.api_key,
            search_url: format!("{}/search", config.base_url),
        })
    }

    /// Check if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Search Google Scholar for papers.
    ///
    /// `limit` is clamped to 1-20 before the request. Year bounds are
    /// omitted from the outbound request entirely when absent.
    ///
    /// # Errors
    ///
    /// Returns error on missing credential or transport failure.
    pub async fn fetch_papers(
        &self,
        query: &str,
        year_from: Option<i32>,
        year_to: Option<i32>,
        limit: i64,
    ) -> ClientResult<RawScholarReply> {
        let num = clamp_num_results(limit);
        tracing::info!(query, num, "Searching Google Scholar");

        let mut params = vec![
            ("engine".to_string(), engines::SCHOLAR.to_string()),
            ("q".to_string(), query.to_string()),
            ("num".to_string(), num.to_string()),
        ];

        if let Some(year) = year_from {
            params.push(("as_ylo".to_string(), year.to_string()));
        }
        if let Some(year) = year_to {
            params.push(("as_yhi".to_string(), year.to_string()));
        }

        self.get(&params).await
    }

    /// Fetch papers citing the paper identified by `citation_id`.
    ///
    /// # Errors
    ///
    /// Returns error on missing credential or transport failure.
    pub async fn fetch_citing_papers(
        &self,
        citation_id: &str,
        limit: i64,
    ) -> ClientResult<RawScholarReply> {
        let num = clamp_num_results(limit);
        tracing::info!(citation_id, num, "Fetching citing papers");

        let params = vec![
            ("engine".to_string(), engines::SCHOLAR.to_string()),
            ("cites".to_string(), citation_id.to_string()),
            ("num".to_string(), num.to_string()),
        ];

        self.get(&params).await
    }

    /// Fetch an author's profile by Scholar author ID.
    ///
    /// # Errors
    ///
    /// Returns error on missing credential or transport failure.
    pub async fn fetch_author_profile(&self, author_id: &str) -> ClientResult<RawAuthorReply> {
        tracing::info!(author_id, "Fetching author profile");

        let params = vec![
            ("engine".to_string(), engines::SCHOLAR_AUTHOR.to_string()),
            ("author_id".to_string(), author_id.to_string()),
        ];

        self.get(&params).await
    }

    /// Search for authors by name.
    ///
    /// # Errors
    ///
    /// Returns error on missing credential or transport failure.
    pub async fn fetch_authors_by_name(&self, name: &str) -> ClientResult<RawProfilesReply> {
        tracing::info!(name, "Searching for author");

        let params = vec![
            ("engine".to_string(), engines::SCHOLAR_PROFILES.to_string()),
            ("mauthors".to_string(), name.to_string()),
        ];

        self.get(&params).await
    }

    /// Make a GET request against the search endpoint.
    ///
    /// Non-2xx bodies are still fed through the raw-reply deserializer:
    /// SerpAPI reports quota and parameter errors as JSON `{"error": ...}`
    /// payloads with a 4xx status, and those must surface as backend errors
    /// rather than transport failures.
    async fn get<T>(&self, params: &[(String, String)]) -> ClientResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ClientError::MissingCredential);
        };

        let mut query = params.to_vec();
        query.push(("api_key".to_string(), api_key.to_string()));

        let response = self.client.get(&self.search_url).query(&query).send().await?;

        let status = response.status();
        if status.is_success() {
            return response.json::<T>().await.map_err(ClientError::from);
        }

        let text = response.text().await.unwrap_or_default();
        match serde_json::from_str::<T>(&text) {
            Ok(reply) => Ok(reply),
            Err(_) => Err(ClientError::unexpected_status(status.as_u16(), text)),
        }
    }
}

impl std::fmt::Debug for SerpApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerpApiClient").field("has_api_key", &self.has_api_key()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_credential_short_circuits() {
        let client = SerpApiClient::new(Config::new(None)).unwrap();
        let err = client.fetch_papers("anything", None, None, 5).await.unwrap_err();
        assert!(matches!(err, ClientError::MissingCredential));
    }

    #[test]
    fn test_debug_hides_key() {
        let client = SerpApiClient::new(Config::new(Some("secret".to_string()))).unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("has_api_key"));
    }
}
