//! The feed state machine.
//!
//! `FeedState` owns the [`CatalogStore`] and decides, synchronously, which
//! page to fetch next and whether a fetch result may be applied. It never
//! awaits; the driver runs the fetches and hands results back.

use std::fmt;

use crate::catalog::{CatalogQuery, CatalogStore, Movie, MovieDetails, PageResult};
use crate::transport::TransportError;

/// Identifies the query a fetch belongs to.
///
/// Bumped on every settled query; results tagged with an older generation
/// are stale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which trigger issued a page fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// First page after a settled query; replaces the list.
    Query,
    /// Next page after a load-more request; appends to the list.
    LoadMore,
}

impl FetchKind {
    /// Operation name used when reporting failures.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Query => "query fetch",
            Self::LoadMore => "load-more fetch",
        }
    }
}

/// A page fetch the driver should run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub generation: Generation,
    pub kind: FetchKind,
    pub query: CatalogQuery,
    pub page: u32,
}

/// What applying a page result did to the store.
#[derive(Debug)]
pub enum PageOutcome {
    /// Query result replaced the list.
    Replaced { added: usize },
    /// Load-more result was appended; `skipped` movies were already listed.
    Appended { added: usize, skipped: usize },
    /// The fetch failed; the store was updated per the failure policy.
    Failed(TransportError),
    /// The result belongs to a superseded query and was discarded.
    Stale,
}

/// Read-only snapshot for presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedView {
    /// Last settled query.
    pub query: CatalogQuery,
    pub items: Vec<Movie>,
    pub current_page: u32,
    pub has_more: bool,
    pub is_loading: bool,
    /// Movie shown in the detail panel, if any.
    pub selected_detail: Option<MovieDetails>,
}

/// Fetch orchestration state: the store, the active query and its generation.
#[derive(Debug, Default)]
pub struct FeedState {
    store: CatalogStore,
    query: CatalogQuery,
    generation: Generation,
    selected_detail: Option<MovieDetails>,
}

impl FeedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// The last settled query.
    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn selected_detail(&self) -> Option<&MovieDetails> {
        self.selected_detail.as_ref()
    }

    /// A debounced query settled: start over on page 1.
    ///
    /// Resets the store, marks it loading and invalidates every fetch issued
    /// for earlier queries, including an outstanding load-more.
    pub fn settle_query(&mut self, raw: &str) -> PageRequest {
        self.generation = self.generation.next();
        self.query = CatalogQuery::from_text(raw);
        self.store.reset();
        self.store.set_loading(true);

        PageRequest {
            generation: self.generation,
            kind: FetchKind::Query,
            query: self.query.clone(),
            page: 1,
        }
    }

    /// Ask for the next page of the active query.
    ///
    /// Returns `None` while a fetch is outstanding, when the last page has
    /// been reached, or before any query has settled. Safe to call on every
    /// scroll tick.
    pub fn request_more(&mut self) -> Option<PageRequest> {
        if self.generation == Generation::default()
            || self.store.is_loading()
            || !self.store.has_more()
        {
            return None;
        }

        self.store.set_loading(true);

        Some(PageRequest {
            generation: self.generation,
            kind: FetchKind::LoadMore,
            query: self.query.clone(),
            page: self.store.current_page().saturating_add(1),
        })
    }

    /// Whether a result for `request` may still be applied.
    pub fn is_current(&self, request: &PageRequest) -> bool {
        request.generation == self.generation
    }

    /// Apply the result of a page fetch.
    ///
    /// Stale results leave the store untouched, including the loading flag.
    /// A failed query fetch empties the list; a failed load-more keeps it.
    /// Neither failure touches the page number or `has_more`.
    pub fn apply_page(
        &mut self,
        request: &PageRequest,
        result: Result<PageResult, TransportError>,
    ) -> PageOutcome {
        if !self.is_current(request) {
            return PageOutcome::Stale;
        }

        let outcome = match result {
            Ok(page) => {
                self.store.set_page(page.page);
                self.store.set_has_more(page.has_more());
                match request.kind {
                    FetchKind::Query => PageOutcome::Replaced {
                        added: self.store.replace_all(page.items),
                    },
                    FetchKind::LoadMore => {
                        let received = page.items.len();
                        let added = self.store.append_unique(page.items);
                        PageOutcome::Appended {
                            added,
                            skipped: received - added,
                        }
                    }
                }
            }
            Err(e) => {
                if request.kind == FetchKind::Query {
                    self.store.replace_all(Vec::new());
                }
                PageOutcome::Failed(e)
            }
        };

        self.store.set_loading(false);
        outcome
    }

    /// Show a fetched movie in the detail panel.
    pub fn show_detail(&mut self, details: MovieDetails) {
        self.selected_detail = Some(details);
    }

    pub fn close_detail(&mut self) {
        self.selected_detail = None;
    }

    pub fn view(&self) -> FeedView {
        FeedView {
            query: self.query.clone(),
            items: self.store.items().to_vec(),
            current_page: self.store.current_page(),
            has_more: self.store.has_more(),
            is_loading: self.store.is_loading(),
            selected_detail: self.selected_detail.clone(),
        }
    }
}
