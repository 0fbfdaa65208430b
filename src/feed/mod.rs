//! Paginated feed loading shared by every feed-shaped store.
//!
//! This module provides the core protocol for cursor-paginated lists:
//!
//! - **Cursor tracking**: Accumulate pages of items behind an opaque cursor
//! - **Load orchestration**: Single-in-flight fetches, filter switches, refresh
//!
//! # Architecture
//!
//! The module is organized into two submodules:
//!
//! - [`cursor`] - [`FeedCursor`], the pagination state for one logical feed
//! - [`controller`] - [`FeedController`], which drives a cursor against a
//!   pluggable [`PageSource`] capability
//!
//! A controller is created once per feed view and lives for that view's
//! lifetime; filter changes and refreshes reset its cursor in place, so
//! holders of the controller keep observing the same instance.
//!
//! # Example
//!
//! ```ignore
//! let controller = FeedController::new(NewsfeedFilter::Subscribed, source);
//! controller.load_more().await;        // first page
//! controller.load_more().await;        // next page, no-op once exhausted
//! controller.set_filter(NewsfeedFilter::Top).await; // reset + reload
//! let items = controller.snapshot();
//! ```

mod controller;
mod cursor;

pub use controller::{FeedController, FeedError, LoadStats, PageSource};
pub use cursor::{FeedCursor, FeedItem, Keyed, Page};
