//! Mock catalog transport for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::catalog::{CatalogQuery, MovieDetails, MovieId, PageResult};
use crate::transport::{CatalogTransport, TransportError};

/// A recorded transport call for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedFetch {
    Page { query: CatalogQuery, page: u32 },
    Detail { id: MovieId },
}

/// Mock implementation of the CatalogTransport trait.
///
/// Provides controllable behavior for testing:
/// - Return configured pages and details
/// - Delay individual pages to force out-of-order responses
/// - Track calls for assertions
/// - Simulate failures
///
/// Calls are recorded when they start, before any delay, so a test can
/// count fetches that are still outstanding.
///
/// # Example
///
/// ```rust,ignore
/// use moviefeed_core::testing::{MockCatalogTransport, fixtures};
///
/// let transport = MockCatalogTransport::new();
/// transport.set_page(CatalogQuery::Popular, fixtures::page(1..=20, 1, 3)).await;
///
/// let page = transport.fetch_page(&CatalogQuery::Popular, 1).await?;
/// assert_eq!(page.items.len(), 20);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockCatalogTransport {
    /// Pages by (query, page number).
    pages: Arc<RwLock<HashMap<(CatalogQuery, u32), PageResult>>>,
    /// Details by movie ID.
    details: Arc<RwLock<HashMap<MovieId, MovieDetails>>>,
    /// Response delays by (query, page number).
    delays: Arc<RwLock<HashMap<(CatalogQuery, u32), Duration>>>,
    /// Recorded calls.
    calls: Arc<RwLock<Vec<RecordedFetch>>>,
    /// If set, the next call will fail with this error.
    next_error: Arc<RwLock<Option<TransportError>>>,
}

impl MockCatalogTransport {
    /// Create a new empty mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Serve `result` for its page number of `query`.
    pub async fn set_page(&self, query: CatalogQuery, result: PageResult) {
        self.pages
            .write()
            .await
            .insert((query, result.page), result);
    }

    /// Serve details for a movie.
    pub async fn set_detail(&self, details: MovieDetails) {
        self.details.write().await.insert(details.id, details);
    }

    /// Delay the response for one page of a query.
    pub async fn set_delay(&self, query: CatalogQuery, page: u32, delay: Duration) {
        self.delays.write().await.insert((query, page), delay);
    }

    /// Make the next call fail with `error`.
    pub async fn fail_next(&self, error: TransportError) {
        *self.next_error.write().await = Some(error);
    }

    // =========================================================================
    // Assertions
    // =========================================================================

    /// All calls made so far, in order.
    pub async fn calls(&self) -> Vec<RecordedFetch> {
        self.calls.read().await.clone()
    }

    /// Page calls made so far, in order.
    pub async fn page_calls(&self) -> Vec<(CatalogQuery, u32)> {
        self.calls
            .read()
            .await
            .iter()
            .filter_map(|call| match call {
                RecordedFetch::Page { query, page } => Some((query.clone(), *page)),
                RecordedFetch::Detail { .. } => None,
            })
            .collect()
    }

    async fn take_error(&self) -> Option<TransportError> {
        self.next_error.write().await.take()
    }
}

#[async_trait]
impl CatalogTransport for MockCatalogTransport {
    async fn fetch_page(
        &self,
        query: &CatalogQuery,
        page: u32,
    ) -> Result<PageResult, TransportError> {
        self.calls.write().await.push(RecordedFetch::Page {
            query: query.clone(),
            page,
        });

        let error = self.take_error().await;

        let key = (query.clone(), page);
        let delay = self.delays.read().await.get(&key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = error {
            return Err(error);
        }

        self.pages
            .read()
            .await
            .get(&key)
            .cloned()
            .ok_or_else(|| TransportError::NotFound(format!("{} page {}", query, page)))
    }

    async fn fetch_detail(&self, id: MovieId) -> Result<MovieDetails, TransportError> {
        self.calls.write().await.push(RecordedFetch::Detail { id });

        if let Some(error) = self.take_error().await {
            return Err(error);
        }

        self.details
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| TransportError::NotFound(format!("Movie ID {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_serves_configured_page() {
        let transport = MockCatalogTransport::new();
        transport
            .set_page(CatalogQuery::Popular, fixtures::page(1..=3, 1, 2))
            .await;

        let page = transport
            .fetch_page(&CatalogQuery::Popular, 1)
            .await
            .unwrap();
        assert_eq!(page.items.len(), 3);

        let missing = transport.fetch_page(&CatalogQuery::Popular, 2).await;
        assert!(matches!(missing, Err(TransportError::NotFound(_))));

        assert_eq!(
            transport.page_calls().await,
            vec![(CatalogQuery::Popular, 1), (CatalogQuery::Popular, 2)]
        );
    }

    #[tokio::test]
    async fn test_fail_next_applies_once() {
        let transport = MockCatalogTransport::new();
        transport.set_detail(fixtures::movie_details(5, "Alien")).await;
        transport.fail_next(TransportError::RateLimitExceeded).await;

        let first = transport.fetch_detail(5).await;
        assert!(matches!(first, Err(TransportError::RateLimitExceeded)));

        let second = tokio_test::assert_ok!(transport.fetch_detail(5).await);
        assert_eq!(second.title, "Alien");
        assert_eq!(transport.calls().await.len(), 2);
    }
}
