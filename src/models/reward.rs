//! Reward wire models.
//!
//! Read shapes mirror what the backend returns (which in turn mirrors the
//! Twitch Helix custom-reward representation); [`InputReward`] is the write
//! shape for create/update calls. All of these are owned by the backend —
//! this crate only projects them into and out of the edit form model.

use serde::{Deserialize, Serialize};

use super::RewardAction;

/// Custom images uploaded for a reward, in three sizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwitchRewardImage {
    pub url_1x: String,
    pub url_2x: String,
    pub url_4x: String,
}

/// Per-stream redemption limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxPerStreamSetting {
    pub is_enabled: bool,
    /// Meaningful only while `is_enabled`; otherwise unspecified.
    pub max_per_stream: u64,
}

/// Per-user-per-stream redemption limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxPerUserPerStreamSetting {
    pub is_enabled: bool,
    /// Meaningful only while `is_enabled`; otherwise unspecified.
    pub max_per_user_per_stream: u64,
}

/// Cooldown between redemptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalCooldownSetting {
    pub is_enabled: bool,
    /// Meaningful only while `is_enabled`; otherwise unspecified.
    pub global_cooldown_seconds: u64,
}

/// Read-only mirror of a Twitch custom reward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwitchReward {
    pub broadcaster_id: String,
    pub broadcaster_login: String,
    pub broadcaster_name: String,
    pub id: String,
    pub title: String,
    /// Prompt shown to the viewer when redeeming.
    pub prompt: String,
    /// Cost in channel points.
    pub cost: u64,
    /// Uploaded images; `None` if the broadcaster never uploaded any.
    pub image: Option<TwitchRewardImage>,
    pub default_image: Option<TwitchRewardImage>,
    /// Hex color with `#` prefix, e.g. `#00E5CB`.
    pub background_color: String,
    pub is_enabled: bool,
    pub is_user_input_required: bool,
    pub max_per_stream_setting: MaxPerStreamSetting,
    pub max_per_user_per_stream_setting: MaxPerUserPerStreamSetting,
    pub global_cooldown_setting: GlobalCooldownSetting,
    pub is_paused: bool,
    pub is_in_stock: bool,
    pub should_redemptions_skip_request_queue: bool,
    /// `None` if the stream is offline or no per-stream limit is enabled.
    pub redemptions_redeemed_current_stream: Option<u64>,
    /// `None` if the reward is not currently on cooldown.
    pub cooldown_expires_at: Option<String>,
}

/// The service's own record for a reward: the action plus delivery options,
/// keyed by the Twitch reward id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternalCustomReward {
    pub id: String,
    pub user_id: String,
    pub data: RewardAction,
    #[serde(default)]
    pub live_delay: Option<String>,
    #[serde(default)]
    pub auto_accept: bool,
}

/// A complete reward: the Twitch side joined with the service's action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub twitch: TwitchReward,
    pub data: RewardAction,
    /// Playback delay before the action runs, so stream viewers see the
    /// redemption happen on screen. A duration expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_delay: Option<String>,
    /// Accept the redemption immediately instead of queueing it.
    #[serde(default)]
    pub auto_accept: bool,
}

/// Write shape of the Twitch side for create/update calls. The `is_*_enabled`
/// flags are derived at conversion time; a limit value is only sent when its
/// flag is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwitchInputReward {
    pub title: String,
    pub cost: u64,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    pub is_user_input_required: bool,
    pub is_max_per_stream_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_per_stream: Option<u64>,
    pub is_max_per_user_per_stream_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_per_user_per_stream: Option<u64>,
    pub is_global_cooldown_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_cooldown_seconds: Option<u64>,
    pub should_redemptions_skip_request_queue: bool,
}

/// Outbound payload for reward create/update calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputReward {
    pub twitch: TwitchInputReward,
    pub data: RewardAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_delay: Option<String>,
    pub auto_accept: bool,
}
