//! Pagination state for one logical feed.
//!
//! A [`FeedCursor`] owns the accumulated ordered item list and the opaque
//! cursor returned by the data source. It never talks to the network; the
//! controller feeds it pages and callers render from its current list.

// ============================================================================
// Item and Page Types
// ============================================================================

/// An item that can live in a feed.
///
/// The feed core never inspects item payloads beyond the stable unique
/// identifier assigned by the origin system, used to derive display keys.
pub trait FeedItem {
    /// Stable unique identifier for this item.
    fn guid(&self) -> &str;
}

/// One batch of items plus the cursor for the next page.
///
/// An absent `next_cursor` signals the end of the feed for the current
/// filter; reaching it is a normal terminal condition, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items in server order.
    pub items: Vec<T>,
    /// Opaque token for the next page request, or `None` at end of feed.
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    /// A page with no items and no next cursor (end of feed).
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_cursor: None,
        }
    }
}

/// An item paired with the display key assigned to it.
///
/// The key disambiguates items that appear twice in the list (e.g. after a
/// refresh reintroduces overlapping entries), at the cost of changing when
/// the list length changes. See [`FeedCursor::assign_display_keys`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyed<T> {
    pub item: T,
    pub display_key: String,
}

// ============================================================================
// FeedCursor
// ============================================================================

/// Tracks how much of a feed has been loaded and whether more exists.
///
/// The item list grows monotonically between resets: pages are appended in
/// arrival order with no reordering and no deduplication. `reset` clears the
/// state in place so external holders keep observing the same instance.
#[derive(Debug)]
pub struct FeedCursor<T> {
    items: Vec<Keyed<T>>,
    cursor: String,
    exhausted: bool,
}

impl<T> Default for FeedCursor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FeedCursor<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            cursor: String::new(),
            exhausted: false,
        }
    }

    /// Whether another page may exist for the current filter.
    pub fn can_load_more(&self) -> bool {
        !self.exhausted
    }

    /// The opaque cursor to send with the next page request.
    ///
    /// Empty before the first page and after a reset.
    pub fn cursor(&self) -> &str {
        &self.cursor
    }

    /// Accumulated items in arrival order.
    pub fn items(&self) -> &[Keyed<T>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Clear items, cursor, and the exhausted flag.
    ///
    /// Used on filter change or explicit refresh.
    pub fn reset(&mut self) {
        self.items.clear();
        self.cursor.clear();
        self.exhausted = false;
    }
}

impl<T: FeedItem> FeedCursor<T> {
    /// Append one page of items and advance the cursor.
    ///
    /// An absent `next_cursor` marks the feed exhausted; an empty string is
    /// normalized to absent, since the server uses both to mean "no further
    /// page". Returns whether any items were appended, which lets callers
    /// detect the end of the feed without an error path.
    pub fn append_page(&mut self, page: Page<T>) -> bool {
        let next = page.next_cursor.filter(|c| !c.is_empty());
        let appended = !page.items.is_empty();
        if appended {
            self.items.extend(page.items.into_iter().map(|item| Keyed {
                item,
                display_key: String::new(),
            }));
            self.cursor = next.clone().unwrap_or_default();
        }
        self.exhausted = next.is_none();
        appended
    }

    /// Insert a single item at the front of the list.
    ///
    /// Used for locally created content that should appear above existing
    /// entries without a round trip. Does not touch the cursor or the
    /// exhausted flag.
    pub fn prepend(&mut self, item: T) {
        self.items.insert(
            0,
            Keyed {
                item,
                display_key: String::new(),
            },
        );
    }

    /// Derive a display key for every item as `guid:index:len`.
    ///
    /// The key intentionally changes as the list length changes, forcing
    /// views to refresh rather than silently reuse stale rendering state
    /// when overlapping items reappear. Callers needing stable identity
    /// should key off `guid` directly.
    pub fn assign_display_keys(&mut self) {
        let len = self.items.len();
        for (index, keyed) in self.items.iter_mut().enumerate() {
            keyed.display_key = format!("{}:{}:{}", keyed.item.guid(), index, len);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
