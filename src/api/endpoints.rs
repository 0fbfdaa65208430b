//! Typed endpoint methods and the wire envelopes they decode.
//!
//! Paths and response shapes follow the server's v1/v2 REST surface. Every
//! paginated endpoint answers with an envelope carrying the item batch and a
//! `"load-next"` token; the methods here normalize those into the core
//! [`Page`] shape so nothing above this layer sees wire field names.

use reqwest::Method;
use serde::Deserialize;

use super::client::{ApiClient, ApiError};
use crate::channel::{Channel, RewardTier};
use crate::feed::Page;
use crate::newsfeed::Activity;
use crate::notifications::Notification;

// ============================================================================
// Wire Envelopes
// ============================================================================

/// Envelope for paginated list endpoints: `{ entities, "load-next" }`.
#[derive(Debug, Deserialize)]
pub struct FeedEnvelope<T> {
    #[serde(default)]
    pub entities: Vec<T>,
    #[serde(rename = "load-next", default)]
    pub load_next: Option<String>,
}

impl<T> FeedEnvelope<T> {
    /// Normalize to a [`Page`]. An empty `"load-next"` means end of feed,
    /// same as a missing one.
    pub fn into_page(self) -> Page<T> {
        Page {
            items: self.entities,
            next_cursor: self.load_next.filter(|c| !c.is_empty()),
        }
    }
}

/// The boost endpoint names its batch `boosts` instead of `entities`.
#[derive(Debug, Deserialize)]
struct BoostEnvelope {
    #[serde(default)]
    boosts: Vec<Activity>,
    #[serde(rename = "load-next", default)]
    load_next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UnreadCount {
    pub count: u64,
}

#[derive(Debug, Deserialize)]
struct ChannelEnvelope {
    channel: Channel,
}

/// Reward tier lists as the wire sends them, one per currency.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RewardTiers {
    #[serde(default)]
    pub money: Vec<RewardTier>,
    #[serde(default)]
    pub points: Vec<RewardTier>,
}

// ============================================================================
// Newsfeed Endpoints
// ============================================================================

impl ApiClient {
    /// GET `api/v1/newsfeed` — the subscribed feed.
    pub async fn newsfeed(&self, cursor: &str, limit: u32) -> Result<Page<Activity>, ApiError> {
        let envelope: FeedEnvelope<Activity> = self
            .get_json("api/v1/newsfeed", &paged_query(cursor, limit))
            .await?;
        Ok(envelope.into_page())
    }

    /// GET `api/v1/newsfeed/top` — the top feed.
    pub async fn newsfeed_top(&self, cursor: &str, limit: u32) -> Result<Page<Activity>, ApiError> {
        let envelope: FeedEnvelope<Activity> = self
            .get_json("api/v1/newsfeed/top", &paged_query(cursor, limit))
            .await?;
        Ok(envelope.into_page())
    }

    /// GET `api/v2/boost/fetch` — boosted posts, optionally rating-gated.
    pub async fn boosts(
        &self,
        cursor: &str,
        limit: u32,
        rating: Option<u8>,
    ) -> Result<Page<Activity>, ApiError> {
        let mut query = paged_query(cursor, limit).to_vec();
        if let Some(rating) = rating {
            query.push(("rating", rating.to_string()));
        }
        let envelope: BoostEnvelope = self.get_json("api/v2/boost/fetch", &query).await?;
        Ok(Page {
            items: envelope.boosts,
            next_cursor: envelope.load_next.filter(|c| !c.is_empty()),
        })
    }

    /// PUT `api/v2/boost/peer/{guid}` — accept an offered boost.
    pub async fn accept_boost(&self, guid: &str) -> Result<(), ApiError> {
        self.send_empty(Method::PUT, &format!("api/v2/boost/peer/{guid}"))
            .await
    }

    /// DELETE `api/v2/boost/peer/{guid}` — reject an offered boost.
    pub async fn reject_boost(&self, guid: &str) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, &format!("api/v2/boost/peer/{guid}"))
            .await
    }

    /// DELETE `api/v2/boost/newsfeed/{guid}/revoke` — revoke an own boost.
    pub async fn revoke_boost(&self, guid: &str) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, &format!("api/v2/boost/newsfeed/{guid}/revoke"))
            .await
    }
}

// ============================================================================
// Notification Endpoints
// ============================================================================

impl ApiClient {
    /// GET `api/v1/notifications` — the notification feed for one filter.
    pub async fn notifications(
        &self,
        filter: &str,
        cursor: &str,
        limit: u32,
    ) -> Result<Page<Notification>, ApiError> {
        let mut query = paged_query(cursor, limit).to_vec();
        query.push(("filter", filter.to_string()));
        let envelope: FeedEnvelope<Notification> =
            self.get_json("api/v1/notifications", &query).await?;
        Ok(envelope.into_page())
    }

    /// GET `api/v1/notifications/count` — the unread count.
    pub async fn notification_count(&self) -> Result<u64, ApiError> {
        let unread: UnreadCount = self.get_json("api/v1/notifications/count", &[]).await?;
        Ok(unread.count)
    }
}

// ============================================================================
// Channel Endpoints
// ============================================================================

impl ApiClient {
    /// GET `api/v1/channel/{guid}` — one channel profile.
    pub async fn channel(&self, guid: &str) -> Result<Channel, ApiError> {
        let envelope: ChannelEnvelope = self
            .get_json(&format!("api/v1/channel/{guid}"), &[])
            .await?;
        Ok(envelope.channel)
    }

    /// POST `api/v1/subscribe/{guid}` — subscribe to a channel.
    pub async fn subscribe(&self, guid: &str) -> Result<(), ApiError> {
        self.send_empty(Method::POST, &format!("api/v1/subscribe/{guid}"))
            .await
    }

    /// GET `api/v1/wire/rewards/{guid}` — a channel's reward tiers.
    pub async fn rewards(&self, guid: &str) -> Result<RewardTiers, ApiError> {
        self.get_json(&format!("api/v1/wire/rewards/{guid}"), &[])
            .await
    }
}

fn paged_query(cursor: &str, limit: u32) -> [(&'static str, String); 2] {
    [("offset", cursor.to_string()), ("limit", limit.to_string())]
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Bare {
        guid: String,
    }

    #[test]
    fn test_envelope_with_next_cursor() {
        let envelope: FeedEnvelope<Bare> =
            serde_json::from_str(r#"{"entities":[{"guid":"1"}],"load-next":"abc"}"#).unwrap();
        let page = envelope.into_page();
        assert_eq!(page.items, vec![Bare { guid: "1".to_string() }]);
        assert_eq!(page.next_cursor.as_deref(), Some("abc"));
    }

    #[test]
    fn test_envelope_missing_load_next_is_end_of_feed() {
        let envelope: FeedEnvelope<Bare> =
            serde_json::from_str(r#"{"entities":[{"guid":"1"}]}"#).unwrap();
        assert_eq!(envelope.into_page().next_cursor, None);
    }

    #[test]
    fn test_envelope_empty_load_next_is_end_of_feed() {
        let envelope: FeedEnvelope<Bare> =
            serde_json::from_str(r#"{"entities":[],"load-next":""}"#).unwrap();
        let page = envelope.into_page();
        assert!(page.items.is_empty());
        assert_eq!(page.next_cursor, None);
    }

    #[test]
    fn test_envelope_missing_entities_is_empty() {
        let envelope: FeedEnvelope<Bare> = serde_json::from_str(r#"{"load-next":"x"}"#).unwrap();
        assert!(envelope.entities.is_empty());
    }

    #[test]
    fn test_unread_count_decodes() {
        let unread: UnreadCount = serde_json::from_str(r#"{"count":42}"#).unwrap();
        assert_eq!(unread.count, 42);
    }

    #[test]
    fn test_reward_tiers_default_to_empty_lists() {
        let tiers: RewardTiers = serde_json::from_str("{}").unwrap();
        assert!(tiers.money.is_empty());
        assert!(tiers.points.is_empty());
    }
}
