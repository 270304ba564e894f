//! Transport to the remote movie catalog.
//!
//! The feed only talks to the network through [`CatalogTransport`], so tests
//! and embedders can swap the TMDB client for their own implementation.

mod tmdb;

pub use tmdb::{TmdbClient, TmdbConfig};

use async_trait::async_trait;
use thiserror::Error;

use crate::catalog::{CatalogQuery, MovieDetails, MovieId, PageResult};

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed. The request URL is stripped because it carries
    /// the API key.
    #[error("HTTP request failed: {0}")]
    HttpError(reqwest::Error),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// Resource not found (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured (missing or rejected API key).
    #[error("Client not configured: {0}")]
    NotConfigured(String),

    /// The fetch task ended without producing a result.
    #[error("Fetch task failed: {0}")]
    TaskFailed(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        Self::HttpError(e.without_url())
    }
}

/// Single-shot fetches against the catalog API. No implicit retries.
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    /// Fetch one page of the popular list or of a title search.
    async fn fetch_page(
        &self,
        query: &CatalogQuery,
        page: u32,
    ) -> Result<PageResult, TransportError>;

    /// Fetch the full details of one movie.
    async fn fetch_detail(&self, id: MovieId) -> Result<MovieDetails, TransportError>;
}
