//! Twitch user model.

use serde::{Deserialize, Serialize};

/// The slice of a Twitch user the dashboard needs: identity plus avatar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwitchUser {
    pub id: String,
    pub login: String,
    pub profile_image_url: String,
}
