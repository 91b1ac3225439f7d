//! Reward type registry.
//!
//! The single source of truth for everything per-action-type: the label a
//! selection control shows, whether the redeemer has to enter free text, the
//! payload installed when a reward is switched to the type, and the
//! structural validator for payloads arriving from the wire. The compiler
//! enforces that adding a [`RewardActionKind`] variant updates every table
//! here — there is no hand-maintained parallel list to drift.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::models::{
    RewardAction, SlotAction, SpotifyPlayAction, SwapAction, TimeoutAction,
};

/// The tag of a [`RewardAction`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RewardActionKind {
    Timeout,
    SubOnly,
    EmoteOnly,
    BttvSwap,
    FfzSwap,
    SevenTvSwap,
    BttvSlot,
    FfzSlot,
    SevenTvSlot,
    SpotifySkip,
    SpotifyQueue,
    SpotifyPlay,
}

impl RewardActionKind {
    /// Every kind, in the order selection controls list them.
    pub const ALL: [RewardActionKind; 12] = [
        RewardActionKind::Timeout,
        RewardActionKind::SubOnly,
        RewardActionKind::EmoteOnly,
        RewardActionKind::BttvSwap,
        RewardActionKind::FfzSwap,
        RewardActionKind::SevenTvSwap,
        RewardActionKind::BttvSlot,
        RewardActionKind::FfzSlot,
        RewardActionKind::SevenTvSlot,
        RewardActionKind::SpotifySkip,
        RewardActionKind::SpotifyQueue,
        RewardActionKind::SpotifyPlay,
    ];

    /// The wire tag, exactly as it appears in `{type, data}` JSON.
    pub fn tag(&self) -> &'static str {
        match self {
            RewardActionKind::Timeout => "Timeout",
            RewardActionKind::SubOnly => "SubOnly",
            RewardActionKind::EmoteOnly => "EmoteOnly",
            RewardActionKind::BttvSwap => "BttvSwap",
            RewardActionKind::FfzSwap => "FfzSwap",
            RewardActionKind::SevenTvSwap => "SevenTvSwap",
            RewardActionKind::BttvSlot => "BttvSlot",
            RewardActionKind::FfzSlot => "FfzSlot",
            RewardActionKind::SevenTvSlot => "SevenTvSlot",
            RewardActionKind::SpotifySkip => "SpotifySkip",
            RewardActionKind::SpotifyQueue => "SpotifyQueue",
            RewardActionKind::SpotifyPlay => "SpotifyPlay",
        }
    }

    /// Look a kind up by its wire tag.
    pub fn from_tag(tag: &str) -> Option<RewardActionKind> {
        RewardActionKind::ALL.iter().copied().find(|k| k.tag() == tag)
    }

    /// Human-readable label for selection controls.
    pub fn display_name(&self) -> &'static str {
        match self {
            RewardActionKind::Timeout => "Timeout for n seconds",
            RewardActionKind::SubOnly => "Sub-only mode for a duration",
            RewardActionKind::EmoteOnly => "Emote-only mode for a duration",
            RewardActionKind::BttvSwap => "Swap a BTTV emote",
            RewardActionKind::FfzSwap => "Swap a FFZ emote",
            RewardActionKind::SevenTvSwap => "Swap a 7TV emote",
            RewardActionKind::BttvSlot => "Temporary BTTV emote slot",
            RewardActionKind::FfzSlot => "Temporary FFZ emote slot",
            RewardActionKind::SevenTvSlot => "Temporary 7TV emote slot",
            RewardActionKind::SpotifySkip => "Skip the current Spotify track",
            RewardActionKind::SpotifyQueue => "Queue a Spotify track",
            RewardActionKind::SpotifyPlay => "Play a Spotify track",
        }
    }

    /// Whether the redemption needs free text from the viewer (a username to
    /// time out, an emote link, a track to play). This is authoritative: the
    /// write path derives `is_user_input_required` from here, never from
    /// form state.
    pub fn input_required(&self) -> bool {
        match self {
            RewardActionKind::Timeout
            | RewardActionKind::BttvSwap
            | RewardActionKind::FfzSwap
            | RewardActionKind::SevenTvSwap
            | RewardActionKind::BttvSlot
            | RewardActionKind::FfzSlot
            | RewardActionKind::SevenTvSlot
            | RewardActionKind::SpotifyQueue
            | RewardActionKind::SpotifyPlay => true,
            RewardActionKind::SubOnly
            | RewardActionKind::EmoteOnly
            | RewardActionKind::SpotifySkip => false,
        }
    }

    /// The payload installed when the user switches a reward to this kind.
    pub fn default_action(&self) -> RewardAction {
        match self {
            RewardActionKind::Timeout => RewardAction::Timeout(TimeoutAction {
                duration: "1s".to_string(),
                vip: false,
            }),
            RewardActionKind::SubOnly => RewardAction::SubOnly("1m".to_string()),
            RewardActionKind::EmoteOnly => RewardAction::EmoteOnly("1m".to_string()),
            RewardActionKind::BttvSwap => RewardAction::BttvSwap(SwapAction::default()),
            RewardActionKind::FfzSwap => RewardAction::FfzSwap(SwapAction::default()),
            RewardActionKind::SevenTvSwap => RewardAction::SevenTvSwap(SwapAction::default()),
            RewardActionKind::BttvSlot => RewardAction::BttvSlot(default_slot()),
            RewardActionKind::FfzSlot => RewardAction::FfzSlot(default_slot()),
            RewardActionKind::SevenTvSlot => RewardAction::SevenTvSlot(default_slot()),
            RewardActionKind::SpotifySkip => RewardAction::SpotifySkip(()),
            RewardActionKind::SpotifyQueue => {
                RewardAction::SpotifyQueue(SpotifyPlayAction { allow_explicit: false })
            }
            RewardActionKind::SpotifyPlay => {
                RewardAction::SpotifyPlay(SpotifyPlayAction { allow_explicit: false })
            }
        }
    }

    /// Structural check for a `data` payload arriving from the wire: does it
    /// have this kind's shape? Checks types and required fields only — a
    /// well-shaped payload may still carry an unparseable duration, which is
    /// the duration parser's concern, not this one's.
    pub fn validate_wire(&self, payload: &Value) -> bool {
        match self {
            RewardActionKind::Timeout => {
                serde_json::from_value::<TimeoutAction>(payload.clone()).is_ok()
            }
            RewardActionKind::SubOnly | RewardActionKind::EmoteOnly => payload.is_string(),
            RewardActionKind::BttvSwap
            | RewardActionKind::FfzSwap
            | RewardActionKind::SevenTvSwap => {
                serde_json::from_value::<SwapAction>(payload.clone()).is_ok()
            }
            RewardActionKind::BttvSlot
            | RewardActionKind::FfzSlot
            | RewardActionKind::SevenTvSlot => {
                serde_json::from_value::<SlotAction>(payload.clone()).is_ok()
            }
            RewardActionKind::SpotifySkip => payload.is_null(),
            RewardActionKind::SpotifyQueue | RewardActionKind::SpotifyPlay => {
                serde_json::from_value::<SpotifyPlayAction>(payload.clone()).is_ok()
            }
        }
    }
}

fn default_slot() -> SlotAction {
    SlotAction {
        slots: 2,
        expiration: "1d".to_string(),
        allow_unlisted: true,
        reply: true,
    }
}

impl fmt::Display for RewardActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl RewardAction {
    /// The tag of this action.
    pub fn kind(&self) -> RewardActionKind {
        match self {
            RewardAction::Timeout(_) => RewardActionKind::Timeout,
            RewardAction::SubOnly(_) => RewardActionKind::SubOnly,
            RewardAction::EmoteOnly(_) => RewardActionKind::EmoteOnly,
            RewardAction::BttvSwap(_) => RewardActionKind::BttvSwap,
            RewardAction::FfzSwap(_) => RewardActionKind::FfzSwap,
            RewardAction::SevenTvSwap(_) => RewardActionKind::SevenTvSwap,
            RewardAction::BttvSlot(_) => RewardActionKind::BttvSlot,
            RewardAction::FfzSlot(_) => RewardActionKind::FfzSlot,
            RewardAction::SevenTvSlot(_) => RewardActionKind::SevenTvSlot,
            RewardAction::SpotifySkip(_) => RewardActionKind::SpotifySkip,
            RewardAction::SpotifyQueue(_) => RewardActionKind::SpotifyQueue,
            RewardAction::SpotifyPlay(_) => RewardActionKind::SpotifyPlay,
        }
    }
}

/// One entry of the type-selection list consumed by the UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewardTypeOption {
    pub value: String,
    pub display: String,
}

/// The selection list, generated from [`RewardActionKind::ALL`] so it can
/// never diverge from the registry.
pub fn reward_types() -> Vec<RewardTypeOption> {
    RewardActionKind::ALL
        .iter()
        .map(|kind| RewardTypeOption {
            value: kind.tag().to_string(),
            display: kind.display_name().to_string(),
        })
        .collect()
}
