//! eddy — client-side state layer for a paginated social feed API.
//!
//! The crate is organized around one reusable core and three domain stores:
//!
//! - [`feed`] - Cursor pagination and load orchestration shared by every feed
//! - [`api`] - HTTP client for the REST API (`{ entities, "load-next" }` envelopes)
//! - [`newsfeed`] - Activity feed with filter selection and a boost rail
//! - [`notifications`] - Notification feed with a polled unread count
//! - [`channel`] - Channel profile, optimistic subscription, reward tiers
//!
//! Stores are plain instances constructed around a shared [`api::ApiClient`];
//! there are no globals. Each store owns its state behind a mutex and is safe
//! to share via `Arc` across tasks.

pub mod api;
pub mod channel;
pub mod config;
pub mod feed;
pub mod newsfeed;
pub mod notifications;
mod util;

pub use api::{ApiClient, ApiError};
pub use config::{Config, ConfigError};
pub use feed::{FeedController, FeedCursor, FeedError, FeedItem, Keyed, LoadStats, Page, PageSource};
