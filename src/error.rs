//! Typed failures raised inside the catalog and generation adapters.
//!
//! Neither type crosses the public `search` / `summarize` /
//! `discussion_questions` boundary: those collapse every variant to empty
//! output. The `try_*` entry points hand them back for callers that want the
//! reason.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("catalog returned HTTP {0}")]
    Status(StatusCode),
    #[error("catalog response is not a search result: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation backend is disabled")]
    Disabled,
    #[error("{backend} backend requires an API credential")]
    MissingCredential { backend: &'static str },
    #[error("generation request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("generation backend returned HTTP {0}")]
    Status(StatusCode),
    #[error("unexpected response shape: {0}")]
    Malformed(&'static str),
}
