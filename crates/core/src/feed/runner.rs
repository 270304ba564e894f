//! Feed driver and handle.
//!
//! The driver is a single task that owns the [`FeedState`]. Handles send it
//! commands; fetches run as child tasks and their results are applied back
//! on the driver, so every store mutation happens in one place and in order.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::{self, JoinError, JoinSet};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, error, info, warn};

use crate::catalog::{MovieDetails, MovieId, PageResult};
use crate::scroll::ScrollMetrics;
use crate::transport::{CatalogTransport, TransportError};

use super::config::FeedConfig;
use super::debounce::Debouncer;
use super::state::{FeedState, FeedView, PageOutcome, PageRequest};

#[derive(Debug)]
enum FeedCommand {
    QueryChanged(String),
    LoadMore,
    OpenDetail(MovieId),
    CloseDetail,
    Shutdown,
}

enum FetchCompletion {
    Page {
        request: PageRequest,
        result: Result<PageResult, TransportError>,
    },
    Detail {
        id: MovieId,
        result: Result<MovieDetails, TransportError>,
    },
}

/// Create a feed.
///
/// Returns:
/// - `FeedHandle` - for sending input events and observing the list (cheap to clone)
/// - `FeedDriver` - spawn this with `tokio::spawn(driver.run())`
pub fn create_feed(
    config: FeedConfig,
    transport: Arc<dyn CatalogTransport>,
) -> (FeedHandle, FeedDriver) {
    let state = FeedState::new();
    let (tx, rx) = mpsc::channel(config.command_buffer.max(1));
    let (view_tx, view_rx) = watch::channel(state.view());

    let handle = FeedHandle {
        tx,
        view: view_rx,
        scroll_threshold: config.scroll_threshold,
    };

    let driver = FeedDriver {
        debouncer: Debouncer::new(config.debounce()),
        transport,
        rx,
        view_tx,
        state,
        fetches: JoinSet::new(),
        page_tasks: HashMap::new(),
    };

    (handle, driver)
}

/// Handle for driving a feed from presentation code.
///
/// Sending never fails the caller: if the driver has stopped, the command is
/// logged and dropped.
#[derive(Clone)]
pub struct FeedHandle {
    tx: mpsc::Sender<FeedCommand>,
    view: watch::Receiver<FeedView>,
    scroll_threshold: f64,
}

impl FeedHandle {
    /// The search field changed. May be called on every keystroke.
    pub async fn query_changed(&self, raw: impl Into<String>) {
        self.send(FeedCommand::QueryChanged(raw.into())).await;
    }

    /// Request the next page. Ignored while loading or after the last page.
    pub async fn load_more(&self) {
        self.send(FeedCommand::LoadMore).await;
    }

    /// Report the scroll position; requests the next page when near the end.
    ///
    /// Returns whether a load-more request was sent.
    pub async fn scrolled(&self, metrics: ScrollMetrics) -> bool {
        if !metrics.is_near_end(self.scroll_threshold) {
            return false;
        }
        self.load_more().await;
        true
    }

    /// Fetch a movie's details and show them in the detail panel.
    pub async fn open_detail(&self, id: MovieId) {
        self.send(FeedCommand::OpenDetail(id)).await;
    }

    pub async fn close_detail(&self) {
        self.send(FeedCommand::CloseDetail).await;
    }

    /// Stop the driver. Outstanding fetches are aborted.
    pub async fn shutdown(&self) {
        self.send(FeedCommand::Shutdown).await;
    }

    /// Current snapshot.
    pub fn view(&self) -> FeedView {
        self.view.borrow().clone()
    }

    /// Receiver notified after every change to the snapshot.
    pub fn subscribe(&self) -> watch::Receiver<FeedView> {
        self.view.clone()
    }

    async fn send(&self, command: FeedCommand) {
        if let Err(e) = self.tx.send(command).await {
            warn!("Feed driver not running, dropping {:?}", e.0);
        }
    }
}

/// Background task that owns the feed state.
pub struct FeedDriver {
    debouncer: Debouncer<String>,
    transport: Arc<dyn CatalogTransport>,
    rx: mpsc::Receiver<FeedCommand>,
    view_tx: watch::Sender<FeedView>,
    state: FeedState,
    fetches: JoinSet<FetchCompletion>,
    /// Page requests of outstanding fetch tasks, so a task that dies still
    /// settles its request.
    page_tasks: HashMap<task::Id, PageRequest>,
}

impl FeedDriver {
    /// Run until shutdown is requested or every handle is dropped.
    ///
    /// The search field starts out empty, so the popular list is loaded once
    /// the first quiet window passes without input.
    pub async fn run(mut self) {
        info!("Feed driver started");

        self.debouncer.push(String::new());

        loop {
            let deadline = self.debouncer.deadline();

            tokio::select! {
                command = self.rx.recv() => {
                    match command {
                        Some(FeedCommand::Shutdown) | None => break,
                        Some(command) => self.handle_command(command),
                    }
                }
                Some(joined) = self.fetches.join_next_with_id(), if !self.fetches.is_empty() => {
                    match joined {
                        Ok((id, completion)) => {
                            self.page_tasks.remove(&id);
                            self.handle_completion(completion);
                        }
                        Err(e) => self.handle_task_failure(e),
                    }
                }
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some(text) = self.debouncer.take_ready(Instant::now()) {
                        self.settle(text);
                    }
                }
            }
        }

        self.fetches.abort_all();
        self.page_tasks.clear();
        info!("Feed driver stopped");
    }

    fn handle_command(&mut self, command: FeedCommand) {
        match command {
            FeedCommand::QueryChanged(text) => {
                debug!("Query input changed: '{}'", text);
                self.debouncer.push(text);
            }
            FeedCommand::LoadMore => match self.state.request_more() {
                Some(request) => {
                    debug!(
                        "Loading {} page {} ({})",
                        request.query, request.page, request.generation
                    );
                    self.publish();
                    self.spawn_page(request);
                }
                None => debug!(
                    "Load more ignored (loading={}, has_more={})",
                    self.state.store().is_loading(),
                    self.state.store().has_more()
                ),
            },
            FeedCommand::OpenDetail(id) => {
                debug!("Loading details for movie {}", id);
                let transport = Arc::clone(&self.transport);
                self.fetches.spawn(async move {
                    let result = transport.fetch_detail(id).await;
                    FetchCompletion::Detail { id, result }
                });
            }
            FeedCommand::CloseDetail => {
                self.state.close_detail();
                self.publish();
            }
            // Handled by the run loop
            FeedCommand::Shutdown => {}
        }
    }

    fn settle(&mut self, text: String) {
        let request = self.state.settle_query(&text);
        debug!(
            "Query settled: mode={} text='{}' ({})",
            request.query.mode(),
            request.query.text(),
            request.generation
        );
        self.publish();
        self.spawn_page(request);
    }

    fn spawn_page(&mut self, request: PageRequest) {
        let transport = Arc::clone(&self.transport);
        let task_request = request.clone();
        let abort = self.fetches.spawn(async move {
            let result = transport
                .fetch_page(&task_request.query, task_request.page)
                .await;
            FetchCompletion::Page {
                request: task_request,
                result,
            }
        });
        self.page_tasks.insert(abort.id(), request);
    }

    /// A fetch task panicked or was cancelled. Page requests are settled as
    /// failures so the loading flag is cleared.
    fn handle_task_failure(&mut self, e: JoinError) {
        match self.page_tasks.remove(&e.id()) {
            Some(request) => {
                let error = TransportError::TaskFailed(e.to_string());
                self.handle_completion(FetchCompletion::Page {
                    request,
                    result: Err(error),
                });
            }
            None => error!("Detail fetch task failed: {}", e),
        }
    }

    fn handle_completion(&mut self, completion: FetchCompletion) {
        match completion {
            FetchCompletion::Page { request, result } => {
                match self.state.apply_page(&request, result) {
                    PageOutcome::Stale => {
                        debug!(
                            "Discarding stale {} result for {} page {} ({})",
                            request.kind.operation(),
                            request.query,
                            request.page,
                            request.generation
                        );
                        return;
                    }
                    PageOutcome::Failed(e) => {
                        error!(
                            "{} failed for {} page {}: {}",
                            request.kind.operation(),
                            request.query,
                            request.page,
                            e
                        );
                    }
                    PageOutcome::Replaced { added } => {
                        debug!("Loaded {} movies for {}", added, request.query);
                    }
                    PageOutcome::Appended { added, skipped } => {
                        debug!(
                            "Appended {} movies for {} page {} ({} duplicates skipped)",
                            added, request.query, request.page, skipped
                        );
                    }
                }
                self.publish();
            }
            FetchCompletion::Detail { id, result } => match result {
                Ok(details) => {
                    self.state.show_detail(details);
                    self.publish();
                }
                Err(e) => error!("detail fetch failed for movie {}: {}", id, e),
            },
        }
    }

    fn publish(&self) {
        self.view_tx.send_replace(self.state.view());
    }
}
