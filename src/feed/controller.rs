//! Load orchestration for a paginated feed.
//!
//! A [`FeedController`] drives a [`FeedCursor`] against an injected
//! [`PageSource`], enforcing the one rule the whole layer depends on: at most
//! one fetch per controller is ever outstanding. A `loading` flag checked and
//! set under the state lock gates re-entry, and a generation counter bumped on
//! every reset lets responses from superseded fetches be discarded instead of
//! landing in a freshly reset cursor.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use thiserror::Error;

use super::cursor::{FeedCursor, FeedItem, Keyed, Page};

// ============================================================================
// Error Types
// ============================================================================

/// Errors recognized by the feed core.
///
/// There is exactly one kind: the fetch capability failed. The controller
/// catches it at its boundary, logs it, and swallows it; callers retry by
/// simply calling `load_more` or `refresh` again.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The fetch capability failed (network or server error).
    #[error("Fetch failed: {0}")]
    Fetch(#[source] Box<dyn std::error::Error + Send + Sync>),
}

// ============================================================================
// Fetch Capability
// ============================================================================

/// Fetch capability for one feed: resolves a (filter, cursor) pair to a page.
///
/// Implementations map the filter to a concrete endpoint; an empty cursor
/// requests the first page. Supplied by the surrounding API layer and
/// injected at controller construction.
#[async_trait]
pub trait PageSource<F, T>: Send + Sync {
    async fn fetch_page(&self, filter: &F, cursor: &str) -> Result<Page<T>, FeedError>;
}

// ============================================================================
// Load Statistics
// ============================================================================

/// Counters for settled page loads.
///
/// Failures are swallowed by policy, so these counters are the observable
/// seam for callers and tests that need to know a load failed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    /// Pages successfully appended since construction.
    pub pages_loaded: u64,
    /// Fetches that settled with an error since construction.
    pub failed_loads: u64,
}

// ============================================================================
// FeedController
// ============================================================================

struct ControllerState<F, T> {
    filter: F,
    cursor: FeedCursor<T>,
    loading: bool,
    refreshing: bool,
    generation: u64,
    stats: LoadStats,
}

impl<F, T> ControllerState<F, T> {
    /// Reset the cursor in place and invalidate any outstanding fetch.
    ///
    /// Bumping the generation means an in-flight response settles into
    /// nothing; clearing `loading` hands the in-flight slot to the next
    /// caller immediately.
    fn reset(&mut self) {
        self.cursor.reset();
        self.generation += 1;
        self.loading = false;
    }
}

/// Coordinates filter selection, in-flight-request guarding, and cursor
/// population from an injected fetch capability.
///
/// One controller is created per feed view and lives for that view's
/// lifetime. State sits behind a `std::sync::Mutex` that is never held
/// across an await, so the controller can be shared via `Arc` across tasks;
/// two tasks calling [`load_more`](Self::load_more) concurrently still issue
/// a single fetch.
pub struct FeedController<F, T> {
    state: Mutex<ControllerState<F, T>>,
    source: Arc<dyn PageSource<F, T>>,
}

impl<F, T> FeedController<F, T>
where
    F: Clone + PartialEq + std::fmt::Debug,
    T: FeedItem,
{
    pub fn new(filter: F, source: Arc<dyn PageSource<F, T>>) -> Self {
        Self {
            state: Mutex::new(ControllerState {
                filter,
                cursor: FeedCursor::new(),
                loading: false,
                refreshing: false,
                generation: 0,
                stats: LoadStats::default(),
            }),
            source,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState<F, T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetch and append the next page for the current filter.
    ///
    /// A no-op when the feed is exhausted or a fetch is already in flight.
    /// Fetch failures are logged and swallowed: the feed simply does not
    /// grow, and the caller's next `load_more` or `refresh` retries
    /// naturally. This best-effort policy is deliberate, not an accident.
    pub async fn load_more(&self) {
        let (filter, cursor_value, generation) = {
            let mut state = self.lock();
            if !state.cursor.can_load_more() || state.loading {
                return;
            }
            state.loading = true;
            (
                state.filter.clone(),
                state.cursor.cursor().to_string(),
                state.generation,
            )
        };

        let result = self.source.fetch_page(&filter, &cursor_value).await;

        let mut state = self.lock();
        if state.generation != generation {
            // A reset superseded this fetch while it was in flight. The
            // loading flag now belongs to whatever came after the reset.
            tracing::debug!(filter = ?filter, "Discarding page from superseded fetch");
            return;
        }
        state.loading = false;
        match result {
            Ok(page) => {
                let appended = state.cursor.append_page(page);
                state.cursor.assign_display_keys();
                state.stats.pages_loaded += 1;
                tracing::debug!(
                    filter = ?filter,
                    total = state.cursor.len(),
                    more = state.cursor.can_load_more(),
                    appended = appended,
                    "Feed page loaded"
                );
            }
            Err(e) => {
                state.stats.failed_loads += 1;
                tracing::warn!(filter = ?filter, error = %e, "Feed page load failed");
            }
        }
    }

    /// Reset the cursor and reload the first page.
    ///
    /// The transient `refreshing` flag is observable for the whole span of
    /// the reload, e.g. to drive a pull-to-refresh spinner.
    pub async fn refresh(&self) {
        {
            let mut state = self.lock();
            state.refreshing = true;
            state.reset();
        }
        self.load_more().await;
        self.lock().refreshing = false;
    }

    /// Switch filters, resetting and reloading the feed.
    ///
    /// A no-op when the filter is unchanged. The reset happens synchronously
    /// before any fetch is issued, so a fetch outstanding for the old filter
    /// settles into nothing.
    pub async fn set_filter(&self, new_filter: F) {
        {
            let mut state = self.lock();
            if state.filter == new_filter {
                return;
            }
            tracing::debug!(old = ?state.filter, new = ?new_filter, "Switching feed filter");
            state.filter = new_filter;
            state.reset();
        }
        self.refresh().await;
    }

    /// Insert a locally created item at the front of the list.
    pub fn prepend_local(&self, item: T) {
        let mut state = self.lock();
        state.cursor.prepend(item);
        state.cursor.assign_display_keys();
    }

    /// Reset the cursor without reloading.
    pub fn clear(&self) {
        self.lock().reset();
    }

    pub fn filter(&self) -> F {
        self.lock().filter.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    pub fn is_refreshing(&self) -> bool {
        self.lock().refreshing
    }

    pub fn can_load_more(&self) -> bool {
        self.lock().cursor.can_load_more()
    }

    pub fn stats(&self) -> LoadStats {
        self.lock().stats
    }

    pub fn len(&self) -> usize {
        self.lock().cursor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().cursor.is_empty()
    }
}

impl<F, T> FeedController<F, T>
where
    F: Clone + PartialEq + std::fmt::Debug,
    T: FeedItem + Clone,
{
    /// Cloned view of the current list for rendering.
    pub fn snapshot(&self) -> Vec<Keyed<T>> {
        self.lock().cursor.items().to_vec()
    }
}

// ============================================================================
// Tests
// ============================================================================
