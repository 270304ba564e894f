//! Testing utilities and mock implementations.
//!
//! This module provides a mock of the catalog transport so the feed can be
//! exercised without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use moviefeed_core::testing::{fixtures, MockCatalogTransport};
//!
//! let transport = Arc::new(MockCatalogTransport::new());
//! transport.set_page(CatalogQuery::Popular, fixtures::page(1..=20, 1, 3)).await;
//!
//! let (handle, driver) = create_feed(FeedConfig::default(), transport.clone());
//! tokio::spawn(driver.run());
//! ```

mod mock_transport;

pub use mock_transport::{MockCatalogTransport, RecordedFetch};

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::ops::RangeInclusive;

    use crate::catalog::{Movie, MovieDetails, MovieId, PageResult};

    /// Create a test movie with reasonable defaults.
    pub fn movie(id: MovieId) -> Movie {
        Movie {
            id,
            title: format!("Movie {}", id),
            poster_path: Some(format!("/poster-{}.jpg", id)),
            release_date: Some(format!("{}-06-15", 1990 + id % 30)),
            vote_average: Some(7.5),
        }
    }

    /// Create a page holding one movie per id in `ids`.
    pub fn page(ids: RangeInclusive<MovieId>, page: u32, total_pages: u32) -> PageResult {
        PageResult {
            items: ids.map(movie).collect(),
            page,
            total_pages,
        }
    }

    /// Create test movie details.
    pub fn movie_details(id: MovieId, title: &str) -> MovieDetails {
        MovieDetails {
            id,
            title: title.to_string(),
            original_title: Some(title.to_string()),
            tagline: None,
            overview: Some(format!("A movie about {}.", title.to_lowercase())),
            poster_path: Some(format!("/poster-{}.jpg", id)),
            backdrop_path: Some(format!("/backdrop-{}.jpg", id)),
            release_date: Some("2001-01-01".to_string()),
            runtime_minutes: Some(120),
            genres: vec!["Drama".to_string(), "Thriller".to_string()],
            vote_average: Some(7.5),
        }
    }
}
