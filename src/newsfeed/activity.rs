use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::channel::ChannelSummary;
use crate::feed::FeedItem;
use crate::util::time::epoch_seconds_opt;

/// One newsfeed entry, normalized from the wire payload.
///
/// Deserialization is the item-constructor step: timestamps are parsed into
/// UTC datetimes and the embedded owner becomes a typed summary. The feed
/// core only ever reads the guid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Activity {
    pub guid: String,
    #[serde(default)]
    pub owner_guid: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "epoch_seconds_opt")]
    pub time_created: Option<DateTime<Utc>>,
    /// Owning channel, when the server embeds it.
    #[serde(rename = "ownerObj", default)]
    pub owner: Option<ChannelSummary>,
}

impl FeedItem for Activity {
    fn guid(&self) -> &str {
        &self.guid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_decodes_full_payload() {
        let activity: Activity = serde_json::from_str(
            r#"{
                "guid": "42",
                "owner_guid": "100",
                "message": "hello world",
                "time_created": "1700000000",
                "ownerObj": {"guid": "100", "username": "ada", "name": "Ada"}
            }"#,
        )
        .unwrap();
        assert_eq!(activity.guid, "42");
        assert_eq!(activity.message.as_deref(), Some("hello world"));
        assert_eq!(activity.time_created.unwrap().timestamp(), 1_700_000_000);
        assert_eq!(activity.owner.unwrap().username.as_deref(), Some("ada"));
    }

    #[test]
    fn test_activity_tolerates_sparse_payload() {
        let activity: Activity = serde_json::from_str(r#"{"guid":"42"}"#).unwrap();
        assert!(activity.message.is_none());
        assert!(activity.time_created.is_none());
        assert!(activity.owner.is_none());
    }
}
