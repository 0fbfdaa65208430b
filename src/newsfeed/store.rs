use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::api::ApiClient;
use crate::feed::{FeedController, FeedError, Keyed, LoadStats, Page, PageSource};

use super::activity::Activity;

/// Which query the newsfeed is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsfeedFilter {
    /// Activities from subscribed channels.
    Subscribed,
    /// Trending activities.
    Top,
    /// Boosted activities only.
    Boostfeed,
}

/// Maps each filter to its endpoint. The exhaustive match means an
/// unrecognized filter cannot reach the network layer.
struct NewsfeedSource {
    api: Arc<ApiClient>,
    page_limit: u32,
}

#[async_trait]
impl PageSource<NewsfeedFilter, Activity> for NewsfeedSource {
    async fn fetch_page(
        &self,
        filter: &NewsfeedFilter,
        cursor: &str,
    ) -> Result<Page<Activity>, FeedError> {
        let page = match filter {
            NewsfeedFilter::Subscribed => self.api.newsfeed(cursor, self.page_limit).await,
            NewsfeedFilter::Top => self.api.newsfeed_top(cursor, self.page_limit).await,
            NewsfeedFilter::Boostfeed => self.api.boosts(cursor, self.page_limit, None).await,
        };
        page.map_err(|e| FeedError::Fetch(Box::new(e)))
    }
}

/// State for the newsfeed view.
///
/// Owns the filterable activity feed and the boost rail shown above it.
/// Feed loads follow the core policy: single in-flight fetch, failures
/// logged and swallowed, retried by the caller's next scroll or refresh.
pub struct NewsfeedStore {
    feed: FeedController<NewsfeedFilter, Activity>,
    boosts: Mutex<BoostRail>,
    api: Arc<ApiClient>,
}

#[derive(Default)]
struct BoostRail {
    entries: Vec<Activity>,
    loading: bool,
}

impl NewsfeedStore {
    /// First page size for the boost rail.
    const BOOST_RAIL_LIMIT: u32 = 15;

    pub fn new(api: Arc<ApiClient>, page_limit: u32) -> Self {
        let source = Arc::new(NewsfeedSource {
            api: api.clone(),
            page_limit,
        });
        Self {
            feed: FeedController::new(NewsfeedFilter::Subscribed, source),
            boosts: Mutex::new(BoostRail::default()),
            api,
        }
    }

    fn boost_rail(&self) -> MutexGuard<'_, BoostRail> {
        self.boosts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetch and append the next feed page for the current filter.
    pub async fn load_feed(&self) {
        self.feed.load_more().await;
    }

    /// Reset the feed and reload its first page.
    pub async fn refresh(&self) {
        self.feed.refresh().await;
    }

    /// Switch the feed to another query, resetting and reloading.
    pub async fn set_filter(&self, filter: NewsfeedFilter) {
        self.feed.set_filter(filter).await;
    }

    /// Show a locally created activity at the top of the feed without a
    /// round trip, e.g. right after posting.
    pub fn prepend(&self, activity: Activity) {
        self.feed.prepend_local(activity);
    }

    /// Load the first page of boosted posts for the rail.
    ///
    /// Failures are logged and swallowed; the rail keeps its last contents.
    pub async fn load_boosts(&self, rating: Option<u8>) {
        self.boost_rail().loading = true;
        let result = self.api.boosts("", Self::BOOST_RAIL_LIMIT, rating).await;
        let mut rail = self.boost_rail();
        rail.loading = false;
        match result {
            Ok(page) => rail.entries = page.items,
            Err(e) => tracing::warn!(error = %e, "Boost rail load failed"),
        }
    }

    /// Empty the feed without reloading.
    pub fn clear_feed(&self) {
        self.feed.clear();
    }

    /// Empty the boost rail.
    pub fn clear_boosts(&self) {
        self.boost_rail().entries.clear();
    }

    pub fn activities(&self) -> Vec<Keyed<Activity>> {
        self.feed.snapshot()
    }

    pub fn boosts(&self) -> Vec<Activity> {
        self.boost_rail().entries.clone()
    }

    pub fn filter(&self) -> NewsfeedFilter {
        self.feed.filter()
    }

    pub fn is_loading(&self) -> bool {
        self.feed.is_loading()
    }

    pub fn is_loading_boosts(&self) -> bool {
        self.boost_rail().loading
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
