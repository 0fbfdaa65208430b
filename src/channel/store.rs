use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::api::ApiClient;

use super::model::{Channel, Rewards};

/// State for one channel view: the loaded profile and its reward tiers.
///
/// Load failures are logged and swallowed, leaving the previous state in
/// place; subscription is applied optimistically and rolled back when the
/// request fails.
pub struct ChannelStore {
    api: Arc<ApiClient>,
    state: Mutex<ChannelState>,
}

#[derive(Default)]
struct ChannelState {
    channel: Option<Channel>,
    rewards: Option<Rewards>,
}

impl ChannelStore {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            state: Mutex::new(ChannelState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ChannelState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load a channel by guid, clearing any previously shown profile first
    /// so the view never renders the old channel under the new guid.
    pub async fn load(&self, guid: &str) {
        self.lock().channel = None;
        match self.api.channel(guid).await {
            Ok(channel) => self.lock().channel = Some(channel),
            Err(e) => tracing::warn!(guid = %guid, error = %e, "Channel load failed"),
        }
    }

    /// Subscribe to the loaded channel.
    ///
    /// The subscribed flag flips before the request goes out so the UI
    /// responds immediately; a failed request rolls it back. A no-op when
    /// no channel is loaded.
    pub async fn subscribe(&self) {
        let guid = {
            let mut state = self.lock();
            let Some(channel) = state.channel.as_mut() else {
                return;
            };
            channel.subscribed = true;
            channel.guid.clone()
        };

        if let Err(e) = self.api.subscribe(&guid).await {
            let mut state = self.lock();
            // Roll back only if the view still shows the same channel
            if let Some(channel) = state.channel.as_mut() {
                if channel.guid == guid {
                    channel.subscribed = false;
                }
            }
            tracing::warn!(guid = %guid, error = %e, "Subscribe failed, rolling back");
        }
    }

    /// Load the channel's reward tiers.
    pub async fn load_rewards(&self, guid: &str) {
        match self.api.rewards(guid).await {
            Ok(tiers) => self.lock().rewards = Some(Rewards::from_tiers(tiers)),
            Err(e) => tracing::warn!(guid = %guid, error = %e, "Rewards load failed"),
        }
    }

    /// Drop the loaded profile and rewards, e.g. when leaving the view.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.channel = None;
        state.rewards = None;
    }

    pub fn channel(&self) -> Option<Channel> {
        self.lock().channel.clone()
    }

    pub fn rewards(&self) -> Option<Rewards> {
        self.lock().rewards.clone()
    }
}
