//! Poster and backdrop URL construction.

use serde::{Deserialize, Serialize};

use crate::catalog::{Movie, MovieDetails};

/// Image widths offered by the TMDB image CDN.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PosterSize {
    W200,
    #[default]
    W500,
    Original,
}

impl PosterSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::W200 => "w200",
            Self::W500 => "w500",
            Self::Original => "original",
        }
    }
}

/// Image URL configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesConfig {
    /// CDN base URL, without the size segment.
    #[serde(default = "default_image_base_url")]
    pub base_url: String,
    /// Shown when a movie has no image.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_placeholder() -> String {
    "assets/placeholder.jpg".to_string()
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            base_url: default_image_base_url(),
            placeholder: default_placeholder(),
        }
    }
}

/// Builds image URLs from relative TMDB paths.
#[derive(Debug, Clone)]
pub struct ImageUrls {
    base_url: String,
    placeholder: String,
}

impl Default for ImageUrls {
    fn default() -> Self {
        Self::new(&ImagesConfig::default())
    }
}

impl ImageUrls {
    pub fn new(config: &ImagesConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            placeholder: config.placeholder.clone(),
        }
    }

    /// URL for `path` at `size`, or the placeholder when there is no path.
    pub fn url(&self, path: Option<&str>, size: PosterSize) -> String {
        match path.filter(|p| !p.is_empty()) {
            Some(path) => format!("{}/{}{}", self.base_url, size.as_str(), path),
            None => self.placeholder.clone(),
        }
    }

    pub fn poster(&self, movie: &Movie, size: PosterSize) -> String {
        self.url(movie.poster_path.as_deref(), size)
    }

    /// Backdrop for the detail panel, falling back to the poster.
    pub fn detail_backdrop(&self, details: &MovieDetails, size: PosterSize) -> String {
        let path = details
            .backdrop_path
            .as_deref()
            .or(details.poster_path.as_deref());
        self.url(path, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn test_url_with_size() {
        let urls = ImageUrls::default();
        assert_eq!(
            urls.url(Some("/abc.jpg"), PosterSize::W200),
            "https://image.tmdb.org/t/p/w200/abc.jpg"
        );
        assert_eq!(
            urls.url(Some("/abc.jpg"), PosterSize::default()),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
        assert_eq!(
            urls.url(Some("/abc.jpg"), PosterSize::Original),
            "https://image.tmdb.org/t/p/original/abc.jpg"
        );
    }

    #[test]
    fn test_missing_path_uses_placeholder() {
        let urls = ImageUrls::default();
        assert_eq!(urls.url(None, PosterSize::W500), "assets/placeholder.jpg");
        assert_eq!(urls.url(Some(""), PosterSize::W500), "assets/placeholder.jpg");
    }

    #[test]
    fn test_custom_config() {
        let urls = ImageUrls::new(&ImagesConfig {
            base_url: "http://cdn.local/t/p/".to_string(),
            placeholder: "none.png".to_string(),
        });
        let mut movie = fixtures::movie(7);
        assert_eq!(
            urls.poster(&movie, PosterSize::W200),
            "http://cdn.local/t/p/w200/poster-7.jpg"
        );
        movie.poster_path = None;
        assert_eq!(urls.poster(&movie, PosterSize::W200), "none.png");
    }

    #[test]
    fn test_detail_backdrop_falls_back_to_poster() {
        let urls = ImageUrls::default();
        let mut details = fixtures::movie_details(1, "Heat");
        details.backdrop_path = None;
        assert_eq!(
            urls.detail_backdrop(&details, PosterSize::Original),
            "https://image.tmdb.org/t/p/original/poster-1.jpg"
        );
    }
}
