//! HTTP client for the paginated REST API.
//!
//! [`ApiClient`] owns the connection pool, base URL, timeout, and optional
//! bearer token; per-domain endpoint methods live in [`endpoints`] and
//! normalize the wire envelopes (`{ entities, "load-next" }` and friends)
//! into the core [`Page`](crate::feed::Page) shape.

mod client;
mod endpoints;

pub use client::{ApiClient, ApiError};
pub use endpoints::{FeedEnvelope, RewardTiers, UnreadCount};
