//! Data models: raw backend reply shapes and normalized result entities.
//!
//! Raw models use `#[serde(default)]` everywhere so partial backend replies
//! deserialize instead of failing; normalized entities are the stable shapes
//! callers and LLMs see.

mod inputs;
pub mod raw;
mod results;

pub use inputs::{AuthorSearchArgs, CitationsArgs, ProfileArgs, SearchArgs};
pub use results::{
    Author, AuthorProfile, AuthorResult, CitationResult, CitingPaper, Paper, Publication,
    ScholarResult,
};
