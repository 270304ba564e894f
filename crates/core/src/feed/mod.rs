//! Fetch orchestration for the movie feed.
//!
//! Reconciles three inputs against one [`CatalogStore`](crate::catalog::CatalogStore):
//! - **Query changes**: debounced, then page 1 is fetched; only the most
//!   recently settled query may apply its result
//! - **Load more**: next page of the active query, guarded by the loading flag
//! - **Details**: independent fetches shown in the detail panel

mod config;
mod debounce;
mod runner;
mod state;

pub use config::FeedConfig;
pub use debounce::Debouncer;
pub use runner::{create_feed, FeedDriver, FeedHandle};
pub use state::{FeedState, FeedView, FetchKind, Generation, PageOutcome, PageRequest};
