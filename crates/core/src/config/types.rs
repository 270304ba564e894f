use serde::{Deserialize, Serialize};

use crate::feed::FeedConfig;
use crate::image::ImagesConfig;
use crate::transport::TmdbConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub images: ImagesConfig,
}

impl Config {
    /// Config with defaults for everything except the TMDB key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            tmdb: TmdbConfig::with_api_key(api_key),
            feed: FeedConfig::default(),
            images: ImagesConfig::default(),
        }
    }
}
