//! Reward action payloads.
//!
//! Every reward carries an action describing what the automation does when
//! the reward is redeemed. On the wire this is a `{type, data}` pair; here it
//! is a proper sum type, so a payload can never be attached to the wrong tag.
//! Field names and defaults are fixed by the backend's JSON encoding.

use serde::{Deserialize, Serialize};

/// The automated action bound to a reward, tagged by action type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum RewardAction {
    /// Time the redeeming user out. The payload duration supports
    /// randomized expressions (`rand(1m;10m)`).
    Timeout(TimeoutAction),
    /// Put the chat into subscriber-only mode for a duration.
    SubOnly(String),
    /// Put the chat into emote-only mode for a duration.
    EmoteOnly(String),
    BttvSwap(#[serde(default)] SwapAction),
    FfzSwap(#[serde(default)] SwapAction),
    SevenTvSwap(#[serde(default)] SwapAction),
    BttvSlot(SlotAction),
    FfzSlot(SlotAction),
    SevenTvSlot(SlotAction),
    /// Skip the currently playing Spotify track. No payload.
    SpotifySkip(()),
    SpotifyQueue(SpotifyPlayAction),
    SpotifyPlay(SpotifyPlayAction),
}

/// Payload for [`RewardAction::Timeout`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeoutAction {
    /// Timeout length; a duration or randomized duration expression.
    pub duration: String,
    /// Whether VIPs may be timed out as well.
    #[serde(default)]
    pub vip: bool,
}

/// Payload for the emote-swap actions: the redeemed emote replaces the
/// oldest swapped one once `limit` is reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapAction {
    /// Maximum number of concurrently swapped emotes. `None` = unlimited.
    pub limit: Option<u16>,
    #[serde(default = "default_true")]
    pub allow_unlisted: bool,
    /// Only controls the "ok" reply; errors are always reported in chat.
    #[serde(default = "default_true")]
    pub reply: bool,
}

impl Default for SwapAction {
    fn default() -> Self {
        Self {
            limit: None,
            allow_unlisted: true,
            reply: true,
        }
    }
}

/// Payload for the emote-slot actions: redeemed emotes occupy one of a fixed
/// number of slots and expire on their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotAction {
    /// Number of slots available to redeemers.
    pub slots: usize,
    /// How long an emote stays; a duration or randomized duration expression.
    pub expiration: String,
    #[serde(default = "default_true")]
    pub allow_unlisted: bool,
    /// Only controls the "ok" reply; errors are always reported in chat.
    #[serde(default = "default_true")]
    pub reply: bool,
}

/// Payload for [`RewardAction::SpotifyPlay`] and [`RewardAction::SpotifyQueue`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotifyPlayAction {
    pub allow_explicit: bool,
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_wire_format() {
        let action = RewardAction::Timeout(TimeoutAction {
            duration: "1s".to_string(),
            vip: false,
        });

        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "Timeout", "data": {"duration": "1s", "vip": false}})
        );
    }

    #[test]
    fn test_timeout_vip_defaults_false() {
        let action: RewardAction =
            serde_json::from_value(serde_json::json!({"type": "Timeout", "data": {"duration": "10m"}}))
                .unwrap();

        match action {
            RewardAction::Timeout(data) => {
                assert_eq!(data.duration, "10m");
                assert!(!data.vip);
            }
            other => panic!("wrong variant: {:?}", other),
        }
    }

    #[test]
    fn test_sub_only_string_payload() {
        let action: RewardAction =
            serde_json::from_value(serde_json::json!({"type": "SubOnly", "data": "10m"})).unwrap();
        assert_eq!(action, RewardAction::SubOnly("10m".to_string()));
    }

    #[test]
    fn test_swap_fields_default_on() {
        let action: RewardAction =
            serde_json::from_value(serde_json::json!({"type": "BttvSwap", "data": {"limit": 5}}))
                .unwrap();

        match action {
            RewardAction::BttvSwap(data) => {
                assert_eq!(data.limit, Some(5));
                assert!(data.allow_unlisted);
                assert!(data.reply);
            }
            other => panic!("wrong variant: {:?}", other),
        }
    }

    #[test]
    fn test_slot_round_trip() {
        let action = RewardAction::SevenTvSlot(SlotAction {
            slots: 3,
            expiration: "2d".to_string(),
            allow_unlisted: false,
            reply: true,
        });

        let json = serde_json::to_string(&action).unwrap();
        let parsed: RewardAction = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, action);
    }

    #[test]
    fn test_spotify_skip_null_payload() {
        let action = RewardAction::SpotifySkip(());
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json, serde_json::json!({"type": "SpotifySkip", "data": null}));

        let parsed: RewardAction = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, RewardAction::SpotifySkip(()));
    }

    #[test]
    fn test_mismatched_payload_rejected() {
        // A slot payload under the Timeout tag must not deserialize.
        let result: Result<RewardAction, _> = serde_json::from_value(serde_json::json!({
            "type": "Timeout",
            "data": {"slots": 2, "expiration": "1d"}
        }));
        assert!(result.is_err());
    }
}
