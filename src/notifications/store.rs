use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::api::ApiClient;
use crate::feed::{FeedController, FeedError, Keyed, LoadStats, Page, PageSource};

use super::model::Notification;
use super::poller::CountPoller;

/// Which slice of notifications the feed shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationFilter {
    All,
    Tags,
    Comments,
    Boosts,
    Votes,
}

impl NotificationFilter {
    /// Query value the API expects.
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationFilter::All => "all",
            NotificationFilter::Tags => "tags",
            NotificationFilter::Comments => "comments",
            NotificationFilter::Boosts => "boosts",
            NotificationFilter::Votes => "votes",
        }
    }
}

struct NotificationSource {
    api: Arc<ApiClient>,
    page_limit: u32,
}

#[async_trait]
impl PageSource<NotificationFilter, Notification> for NotificationSource {
    async fn fetch_page(
        &self,
        filter: &NotificationFilter,
        cursor: &str,
    ) -> Result<Page<Notification>, FeedError> {
        self.api
            .notifications(filter.as_str(), cursor, self.page_limit)
            .await
            .map_err(|e| FeedError::Fetch(Box::new(e)))
    }
}

/// State for the notifications view: the filterable feed and the unread
/// count behind the badge.
pub struct NotificationsStore {
    feed: FeedController<NotificationFilter, Notification>,
    unread: AtomicU64,
    api: Arc<ApiClient>,
}

impl NotificationsStore {
    pub fn new(api: Arc<ApiClient>, page_limit: u32) -> Self {
        let source = Arc::new(NotificationSource {
            api: api.clone(),
            page_limit,
        });
        Self {
            feed: FeedController::new(NotificationFilter::All, source),
            unread: AtomicU64::new(0),
            api,
        }
    }

    /// Fetch and append the next page for the current filter.
    pub async fn load_feed(&self) {
        self.feed.load_more().await;
    }

    /// Reset the feed and reload its first page.
    pub async fn reload_feed(&self) {
        self.feed.refresh().await;
    }

    /// Switch filters, resetting and reloading the feed.
    pub async fn set_filter(&self, filter: NotificationFilter) {
        self.feed.set_filter(filter).await;
    }

    /// Fetch the unread count once.
    ///
    /// Failures are logged and swallowed, leaving the last known count on
    /// the badge.
    pub async fn load_count(&self) {
        match self.api.notification_count().await {
            Ok(count) => self.unread.store(count, Ordering::Relaxed),
            Err(e) => tracing::warn!(error = %e, "Unread count fetch failed"),
        }
    }

    /// Overwrite the unread count, e.g. from a push payload or after the
    /// user opens the notifications view.
    pub fn set_unread(&self, count: u64) {
        self.unread.store(count, Ordering::Relaxed);
    }

    pub fn unread(&self) -> u64 {
        self.unread.load(Ordering::Relaxed)
    }

    /// Start re-fetching the unread count every `period`.
    ///
    /// The returned poller holds only a weak reference to this store; call
    /// [`CountPoller::stop`] on teardown, or just drop it.
    pub fn start_polling(self: &Arc<Self>, period: Duration) -> CountPoller {
        CountPoller::spawn(Arc::downgrade(self), period)
    }

    pub fn notifications(&self) -> Vec<Keyed<Notification>> {
        self.feed.snapshot()
    }

    pub fn filter(&self) -> NotificationFilter {
        self.feed.filter()
    }

    pub fn is_loading(&self) -> bool {
        self.feed.is_loading()
    }

    pub fn is_refreshing(&self) -> bool {
        self.feed.is_refreshing()
    }

    pub fn can_load_more(&self) -> bool {
        self.feed.can_load_more()
    }

    pub fn stats(&self) -> LoadStats {
        self.feed.stats()
    }
}
