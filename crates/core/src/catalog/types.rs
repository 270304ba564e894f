//! Catalog data model: movies, movie details, pages and queries.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// TMDB movie identifier.
pub type MovieId = u32;

// ============================================================================
// Items
// ============================================================================

/// A movie as it appears in a list page.
///
/// Identity is the `id` field; two movies with the same id are the same entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    /// TMDB movie ID.
    pub id: MovieId,
    /// Localized title.
    pub title: String,
    /// Poster path (relative to the image base URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    /// Release date (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    /// Average vote (0-10).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f32>,
}

impl Movie {
    /// Parse the release date, if present and well-formed.
    pub fn release_date_parsed(&self) -> Option<NaiveDate> {
        parse_release_date(self.release_date.as_deref())
    }

    /// Get the release year from the release date.
    pub fn release_year(&self) -> Option<i32> {
        self.release_date_parsed().map(|d| d.year())
    }
}

/// Extended view of a single movie, fetched on demand.
///
/// Never merged into the list; only shown in the detail panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    /// TMDB movie ID.
    pub id: MovieId,
    /// Localized title.
    pub title: String,
    /// Original title (in original language).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    /// Synopsis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,
    /// Release date (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    /// Runtime in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_minutes: Option<u32>,
    /// Genre names.
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f32>,
}

impl MovieDetails {
    /// Get the release year from the release date.
    pub fn release_year(&self) -> Option<i32> {
        parse_release_date(self.release_date.as_deref()).map(|d| d.year())
    }

    /// Genres joined for display, e.g. "Action, Drama".
    pub fn genre_list(&self) -> String {
        self.genres.join(", ")
    }
}

fn parse_release_date(raw: Option<&str>) -> Option<NaiveDate> {
    raw.filter(|d| !d.is_empty())
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
}

// ============================================================================
// Pages and queries
// ============================================================================

/// One page of results. Consumed once to mutate the store, never retained.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    /// Movies on this page, in server order.
    pub items: Vec<Movie>,
    /// Page number (1-based).
    pub page: u32,
    /// Total number of pages available for this query.
    pub total_pages: u32,
}

impl PageResult {
    /// Whether another page exists after this one.
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

/// What the feed is currently showing: the popular list or a text search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CatalogQuery {
    /// Browse popular movies (empty search text).
    #[default]
    Popular,
    /// Search by title.
    Search(String),
}

impl CatalogQuery {
    /// Build a query from raw input text. Surrounding whitespace is ignored
    /// and blank text selects the popular list.
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Self::Popular
        } else {
            Self::Search(trimmed.to_string())
        }
    }

    /// The normalized query text; empty in popular mode.
    pub fn text(&self) -> &str {
        match self {
            Self::Popular => "",
            Self::Search(text) => text,
        }
    }

    /// Mode name used in logs.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::Search(_) => "search",
        }
    }
}

impl std::fmt::Display for CatalogQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Popular => write!(f, "popular"),
            Self::Search(text) => write!(f, "search '{}'", text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(release_date: Option<&str>) -> Movie {
        Movie {
            id: 1,
            title: "Test Movie".to_string(),
            poster_path: None,
            release_date: release_date.map(String::from),
            vote_average: None,
        }
    }

    #[test]
    fn test_release_year() {
        assert_eq!(movie(Some("1999-03-31")).release_year(), Some(1999));
    }

    #[test]
    fn test_release_year_empty_or_malformed() {
        assert_eq!(movie(Some("")).release_year(), None);
        assert_eq!(movie(Some("soon")).release_year(), None);
        assert_eq!(movie(None).release_year(), None);
    }

    #[test]
    fn test_query_from_text_trims() {
        assert_eq!(
            CatalogQuery::from_text("  batman "),
            CatalogQuery::Search("batman".to_string())
        );
        assert_eq!(CatalogQuery::from_text("   "), CatalogQuery::Popular);
        assert_eq!(CatalogQuery::from_text(""), CatalogQuery::Popular);
    }

    #[test]
    fn test_query_text_and_mode() {
        let search = CatalogQuery::from_text("alien");
        assert_eq!(search.text(), "alien");
        assert_eq!(search.mode(), "search");
        assert_eq!(CatalogQuery::Popular.text(), "");
        assert_eq!(CatalogQuery::Popular.mode(), "popular");
    }

    #[test]
    fn test_page_has_more() {
        let page = |page, total_pages| PageResult {
            items: vec![],
            page,
            total_pages,
        };
        assert!(page(1, 3).has_more());
        assert!(!page(3, 3).has_more());
        assert!(!page(1, 0).has_more());
    }

    #[test]
    fn test_genre_list() {
        let details = MovieDetails {
            id: 603,
            title: "The Matrix".to_string(),
            original_title: None,
            tagline: None,
            overview: None,
            poster_path: None,
            backdrop_path: None,
            release_date: Some("1999-03-30".to_string()),
            runtime_minutes: Some(136),
            genres: vec!["Action".to_string(), "Science Fiction".to_string()],
            vote_average: None,
        };
        assert_eq!(details.genre_list(), "Action, Science Fiction");
        assert_eq!(details.release_year(), Some(1999));
    }
}
