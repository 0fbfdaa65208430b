use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::channel::ChannelSummary;
use crate::feed::FeedItem;
use crate::util::time::epoch_seconds_opt;

/// One notification as delivered by the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Notification {
    pub guid: String,
    /// Server-side notification type, e.g. "tag", "comment", "boost_gift".
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, deserialize_with = "epoch_seconds_opt")]
    pub time_created: Option<DateTime<Utc>>,
    /// Channel whose action triggered the notification.
    #[serde(default)]
    pub from: Option<ChannelSummary>,
    /// Guid of the entity the notification points at, when any.
    #[serde(default)]
    pub entity_guid: Option<String>,
}

impl FeedItem for Notification {
    fn guid(&self) -> &str {
        &self.guid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_decodes() {
        let notification: Notification = serde_json::from_str(
            r#"{
                "guid": "n1",
                "type": "comment",
                "time_created": 1700000000,
                "from": {"guid": "100", "username": "ada"},
                "entity_guid": "42"
            }"#,
        )
        .unwrap();
        assert_eq!(notification.kind, "comment");
        assert_eq!(notification.from.unwrap().guid, "100");
        assert_eq!(notification.entity_guid.as_deref(), Some("42"));
    }
}
