use serde::Deserialize;

use crate::api::RewardTiers;

// ============================================================================
// Channel Types
// ============================================================================

/// Minimal channel embed carried inside feed items and notifications.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChannelSummary {
    pub guid: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Full channel profile as served by the channel endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Channel {
    pub guid: String,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Short bio shown on the profile header.
    #[serde(rename = "briefdescription", default)]
    pub brief_description: Option<String>,
    /// Whether the session user subscribes to this channel.
    #[serde(default)]
    pub subscribed: bool,
    #[serde(rename = "subscribers_count", default)]
    pub subscribers: u64,
}

// ============================================================================
// Reward Types
// ============================================================================

/// One tier a supporter can wire to a channel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RewardTier {
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
}

/// A channel's reward tiers plus the combined list views render from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rewards {
    pub money: Vec<RewardTier>,
    pub points: Vec<RewardTier>,
    /// Money tiers first, then points, each in server order.
    pub merged: Vec<RewardTier>,
}

impl Rewards {
    pub(crate) fn from_tiers(tiers: RewardTiers) -> Self {
        let mut merged = tiers.money.clone();
        merged.extend(tiers.points.iter().cloned());
        Self {
            money: tiers.money,
            points: tiers.points,
            merged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_channel_decodes_wire_names() {
        let channel: Channel = serde_json::from_str(
            r#"{
                "guid": "100",
                "username": "ada",
                "name": "Ada",
                "briefdescription": "hello",
                "subscribed": true,
                "subscribers_count": 7
            }"#,
        )
        .unwrap();
        assert_eq!(channel.brief_description.as_deref(), Some("hello"));
        assert!(channel.subscribed);
        assert_eq!(channel.subscribers, 7);
    }

    #[test]
    fn test_channel_defaults_optional_fields() {
        let channel: Channel =
            serde_json::from_str(r#"{"guid":"100","username":"ada"}"#).unwrap();
        assert!(!channel.subscribed);
        assert_eq!(channel.subscribers, 0);
        assert!(channel.name.is_none());
    }

    #[test]
    fn test_rewards_merge_is_money_then_points() {
        let tiers: RewardTiers = serde_json::from_str(
            r#"{
                "money": [{"amount": 5.0, "description": "supporter"}],
                "points": [{"amount": 100.0}, {"amount": 500.0}]
            }"#,
        )
        .unwrap();
        let rewards = Rewards::from_tiers(tiers);
        assert_eq!(rewards.merged.len(), 3);
        assert_eq!(rewards.merged[0].amount, 5.0);
        assert_eq!(rewards.merged[1].amount, 100.0);
        assert_eq!(rewards.merged[2].amount, 500.0);
    }
}
