//! TMDB (The Movie Database) API client.
//!
//! TMDB requires an API key for access. Every request also carries the
//! configured response language.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CatalogTransport, TransportError};
use crate::catalog::{CatalogQuery, Movie, MovieDetails, MovieId, PageResult};

/// TMDB API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// TMDB API key (required).
    pub api_key: String,
    /// Base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Response language, e.g. "ru-RU".
    #[serde(default = "default_language")]
    pub language: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_language() -> String {
    "ru-RU".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl TmdbConfig {
    /// Config with defaults for everything except the key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            language: default_language(),
            timeout_secs: default_timeout(),
        }
    }
}

/// TMDB API client.
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
    language: String,
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: TmdbConfig) -> Result<Self, TransportError> {
        if config.api_key.is_empty() {
            return Err(TransportError::NotConfigured(
                "TMDB API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            language: config.language,
        })
    }

    /// Get one page of popular movies.
    pub async fn popular_movies(&self, page: u32) -> Result<PageResult, TransportError> {
        let url = format!("{}/movie/popular", self.base_url);

        debug!("TMDB popular movies: page={}", page);

        let response = self
            .client
            .get(&url)
            .query(&self.common_params())
            .query(&[("page", page.to_string())])
            .send()
            .await?;

        let body: TmdbPageResponse = Self::read_json(response, "popular movies").await?;
        Ok(body.into())
    }

    /// Search for movies by title.
    pub async fn search_movies(&self, query: &str, page: u32) -> Result<PageResult, TransportError> {
        let url = format!("{}/search/movie", self.base_url);

        debug!("TMDB movie search: query='{}', page={}", query, page);

        let response = self
            .client
            .get(&url)
            .query(&self.common_params())
            .query(&[("query", query.to_string()), ("page", page.to_string())])
            .send()
            .await?;

        let body: TmdbPageResponse = Self::read_json(response, "movie search").await?;
        Ok(body.into())
    }

    /// Get a specific movie by TMDB ID.
    pub async fn get_movie(&self, id: MovieId) -> Result<MovieDetails, TransportError> {
        let url = format!("{}/movie/{}", self.base_url, id);

        debug!("TMDB get movie: id={}", id);

        let response = self
            .client
            .get(&url)
            .query(&self.common_params())
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(TransportError::NotFound(format!("Movie ID {}", id)));
        }

        let body: TmdbMovieDetails = Self::read_json(response, "movie").await?;
        Ok(body.into())
    }

    fn common_params(&self) -> [(&'static str, &str); 2] {
        [("api_key", self.api_key.as_str()), ("language", self.language.as_str())]
    }

    /// Map the status code to an error, then decode the body.
    async fn read_json<T: DeserializeOwned>(
        response: Response,
        what: &str,
    ) -> Result<T, TransportError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(TransportError::NotConfigured(
                "Invalid TMDB API key".to_string(),
            ));
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(TransportError::RateLimitExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            TransportError::ParseError(format!("Failed to parse {} response: {}", what, e))
        })
    }
}

#[async_trait]
impl CatalogTransport for TmdbClient {
    async fn fetch_page(
        &self,
        query: &CatalogQuery,
        page: u32,
    ) -> Result<PageResult, TransportError> {
        match query {
            CatalogQuery::Popular => self.popular_movies(page).await,
            CatalogQuery::Search(text) => self.search_movies(text, page).await,
        }
    }

    async fn fetch_detail(&self, id: MovieId) -> Result<MovieDetails, TransportError> {
        self.get_movie(id).await
    }
}

// ============================================================================
// TMDB API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct TmdbPageResponse {
    page: u32,
    total_pages: u32,
    #[serde(default)]
    results: Vec<TmdbMovieResult>,
}

#[derive(Debug, Deserialize)]
struct TmdbMovieResult {
    id: u32,
    title: String,
    poster_path: Option<String>,
    release_date: Option<String>,
    vote_average: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct TmdbMovieDetails {
    id: u32,
    title: String,
    original_title: Option<String>,
    tagline: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    release_date: Option<String>,
    runtime: Option<u32>,
    #[serde(default)]
    genres: Vec<TmdbGenre>,
    vote_average: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct TmdbGenre {
    name: String,
}

// ============================================================================
// Conversions
// ============================================================================

/// TMDB sends "" for unknown dates and blank taglines.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<TmdbPageResponse> for PageResult {
    fn from(r: TmdbPageResponse) -> Self {
        Self {
            items: r.results.into_iter().map(Movie::from).collect(),
            page: r.page,
            total_pages: r.total_pages,
        }
    }
}

impl From<TmdbMovieResult> for Movie {
    fn from(r: TmdbMovieResult) -> Self {
        Self {
            id: r.id,
            title: r.title,
            poster_path: non_empty(r.poster_path),
            release_date: non_empty(r.release_date),
            vote_average: r.vote_average,
        }
    }
}

impl From<TmdbMovieDetails> for MovieDetails {
    fn from(d: TmdbMovieDetails) -> Self {
        Self {
            id: d.id,
            title: d.title,
            original_title: d.original_title,
            tagline: non_empty(d.tagline),
            overview: non_empty(d.overview),
            poster_path: non_empty(d.poster_path),
            backdrop_path: non_empty(d.backdrop_path),
            release_date: non_empty(d.release_date),
            runtime_minutes: d.runtime,
            genres: d.genres.into_iter().map(|g| g.name).collect(),
            vote_average: d.vote_average,
        }
    }
}
