//! Movie catalog model and the store holding the accumulated list.
//!
//! The store is owned by the feed state machine and only mutated by it;
//! presentation code reads snapshots.

mod store;
mod types;

pub use store::CatalogStore;
pub use types::*;
