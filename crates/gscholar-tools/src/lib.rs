//! Google Scholar Tools
//!
//! Google Scholar search for LLM tool-calling, backed by SerpAPI. Raw
//! SerpAPI payloads are normalized into stable result entities, exposed
//! as tool schemas for OpenAI- and Anthropic-style providers, and driven
//! by a bounded multi-turn dispatch loop.
//!
//! # Features
//!
//! - **Four operations**: paper search, citation lookup, author profiles,
//!   author search
//! - **Normalization**: venue/year parsing, defensive extraction, error
//!   payloads folded into result entities
//! - **Two dialects**: one canonical tool description rendered per
//!   provider, plus a free-text action protocol for models without
//!   native tool calling
//! - **Bounded dispatch**: explicit turn budget instead of an open loop
//!
//! # Example
//!
//! ```no_run
//! use gscholar_tools::{client::SerpApiClient, config::Config};
//! use gscholar_tools::models::SearchArgs;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let client = SerpApiClient::new(config)?;
//!
//!     let args = SearchArgs { query: "retrieval augmented generation".into(), ..Default::default() };
//!     let result = gscholar_tools::tools::run_search(&client, &args).await;
//!     println!("{}", result.total_results);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod formatters;
pub mod models;
pub mod normalizer;
pub mod tools;

pub use client::SerpApiClient;
pub use config::Config;
pub use error::{ClientError, ToolError};
