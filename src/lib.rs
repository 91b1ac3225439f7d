//! # Reward Console
//!
//! Data and client layer for a Twitch channel-point rewards dashboard. The
//! backend service executes rewards and talks to Twitch; this crate owns
//! everything in front of it: the wire DTOs, the reward type registry, the
//! form-model conversion, and the REST client.
//!
//! ## Architecture
//!
//! - **models**: Wire data structures (rewards, actions, users, logs)
//! - **registry**: Per-action-type metadata and wire payload validation
//! - **duration**: Duration expression parsing ("90", "2d", "rand(1m;10m)")
//! - **convert**: Reward ↔ editable form model conversion
//! - **client**: REST client for the rewards backend
//! - **config**: Configuration loading and validation

pub mod client;
pub mod config;
pub mod convert;
pub mod duration;
pub mod models;
pub mod registry;

pub use models::*;

pub use duration::{is_valid_duration, is_valid_reward_duration_expression, parse_duration};
