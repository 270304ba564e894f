pub mod catalog;
pub mod config;
pub mod feed;
pub mod image;
pub mod scroll;
pub mod testing;
pub mod transport;

pub use catalog::{CatalogQuery, CatalogStore, Movie, MovieDetails, MovieId, PageResult};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError,
};
pub use feed::{
    create_feed, FeedConfig, FeedDriver, FeedHandle, FeedState, FeedView, FetchKind, Generation,
    PageOutcome, PageRequest,
};
pub use image::{ImageUrls, ImagesConfig, PosterSize};
pub use scroll::{ScrollMetrics, DEFAULT_SCROLL_THRESHOLD};
pub use transport::{CatalogTransport, TmdbClient, TmdbConfig, TransportError};
