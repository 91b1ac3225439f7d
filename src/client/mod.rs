//! Backend REST API client.
//!
//! Thin wrapper over the rewards service's `/api/v1` surface: bearer-token
//! auth, JSON bodies, server-supplied error messages. The backend owns all
//! reward semantics; this client only moves DTOs.

mod cache;

pub use cache::RewardsCache;

use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::models::{
    sort_newest_first, InputReward, InternalCustomReward, LogEntry, Reward, TwitchReward,
    TwitchUser, WireLogEntry,
};

/// Errors that can occur talking to the backend.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The session token is missing or expired. Callers should discard the
    /// session and send the user back through login.
    #[error("Unauthorized")]
    Unauthorized,

    /// Any other non-2xx response, carrying the server's message.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base of the REST surface, including the `/api/v1/` prefix.
    pub base_url: Url,

    /// Bearer token for the logged-in session, if any.
    pub token: Option<String>,

    /// Request timeout.
    pub timeout: Duration,

    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("http://localhost:8082/api/v1/").unwrap(),
            token: None,
            timeout: Duration::from_secs(30),
            user_agent: format!("reward-console/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Client for the rewards backend.
pub struct RewardsClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl RewardsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            token: config.token,
        })
    }

    /// Create a client for `base_url` with default settings.
    pub fn with_base_url(base_url: Url, token: Option<String>) -> Result<Self, ClientError> {
        Self::new(ClientConfig {
            base_url,
            token,
            ..Default::default()
        })
    }

    // ── users & editors ─────────────────────────────────────────────────

    /// The logged-in user.
    pub async fn current_user(&self) -> Result<TwitchUser, ClientError> {
        self.get(&["users", "me"]).await
    }

    /// Public info for any user by login name.
    pub async fn user_info(&self, login: &str) -> Result<TwitchUser, ClientError> {
        self.get(&["users", login]).await
    }

    /// Editors of the logged-in broadcaster's rewards.
    pub async fn editors(&self) -> Result<Vec<TwitchUser>, ClientError> {
        self.get(&["editors"]).await
    }

    pub async fn add_editor(&self, name: &str) -> Result<(), ClientError> {
        self.request(Method::PUT, &["editors", name], None).await?;
        Ok(())
    }

    pub async fn remove_editor(&self, name: &str) -> Result<(), ClientError> {
        self.request(Method::DELETE, &["editors", name], None).await?;
        Ok(())
    }

    /// Broadcasters the logged-in user can edit.
    pub async fn broadcasters(&self) -> Result<Vec<TwitchUser>, ClientError> {
        self.get(&["editors", "broadcasters"]).await
    }

    // ── rewards ─────────────────────────────────────────────────────────

    /// Fetch a broadcaster's rewards: the backend returns the raw Twitch
    /// list and its own records separately; they are joined here by reward
    /// id. Twitch rewards this service does not manage are skipped.
    pub async fn rewards(&self, broadcaster_id: &str) -> Result<Vec<Reward>, ClientError> {
        let response: RewardsResponse = self.get(&["rewards", broadcaster_id]).await?;
        let rewards = zip_rewards(response.twitch, response.data);
        debug!(
            "Loaded {} rewards for broadcaster {}",
            rewards.len(),
            broadcaster_id
        );
        Ok(rewards)
    }

    /// [`Self::rewards`] through the single-slot cache: a hit returns the
    /// cached list, a miss fetches and fills the slot.
    pub async fn rewards_cached(
        &self,
        cache: &mut RewardsCache,
        broadcaster_id: &str,
    ) -> Result<Vec<Reward>, ClientError> {
        if let Some(rewards) = cache.get(broadcaster_id) {
            debug!("Serving rewards for {} from cache", broadcaster_id);
            return Ok(rewards.to_vec());
        }

        let rewards = self.rewards(broadcaster_id).await?;
        cache.store(broadcaster_id, rewards.clone());
        Ok(rewards)
    }

    pub async fn add_reward(
        &self,
        broadcaster_id: &str,
        reward: &InputReward,
    ) -> Result<Reward, ClientError> {
        let body = serde_json::to_value(reward)?;
        let response = self
            .request(Method::PUT, &["rewards", broadcaster_id], Some(body))
            .await?;
        Ok(response.json().await?)
    }

    pub async fn update_reward(
        &self,
        broadcaster_id: &str,
        reward_id: &str,
        reward: &InputReward,
    ) -> Result<Reward, ClientError> {
        let body = serde_json::to_value(reward)?;
        let response = self
            .request(Method::PATCH, &["rewards", broadcaster_id, reward_id], Some(body))
            .await?;
        Ok(response.json().await?)
    }

    pub async fn delete_reward(
        &self,
        broadcaster_id: &str,
        reward_id: &str,
    ) -> Result<(), ClientError> {
        self.request(Method::DELETE, &["rewards", broadcaster_id, reward_id], None)
            .await?;
        Ok(())
    }

    // ── logs ────────────────────────────────────────────────────────────

    /// A broadcaster's reward execution log, newest first.
    pub async fn logs(&self, broadcaster_id: &str) -> Result<Vec<LogEntry>, ClientError> {
        let wire: Vec<WireLogEntry> = self.get(&["logs", broadcaster_id]).await?;

        let mut entries: Vec<LogEntry> = wire.into_iter().map(LogEntry::from_wire).collect();
        sort_newest_first(&mut entries);
        Ok(entries)
    }

    // ── request core ────────────────────────────────────────────────────

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let path = segments.join("/");
        self.base_url
            .join(&path)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", path, e)))
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ClientError> {
        let response = self.request(Method::GET, segments, None).await?;
        Ok(response.json().await?)
    }

    /// Send a request and map the status: 401 is [`ClientError::Unauthorized`],
    /// any other non-2xx becomes [`ClientError::Api`] with the `error` field
    /// of a JSON body (or the raw text body) as the message.
    async fn request(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<Value>,
    ) -> Result<reqwest::Response, ClientError> {
        let url = self.endpoint(segments)?;
        debug!("{} {}", method, url);

        let mut request = self.http.request(method, url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: error_message(response).await,
            });
        }

        Ok(response)
    }
}

/// The two halves of the backend's "list rewards" response.
#[derive(Debug, serde::Deserialize)]
struct RewardsResponse {
    twitch: Vec<TwitchReward>,
    data: Vec<InternalCustomReward>,
}

/// Join the Twitch reward list with the service's own records by reward id,
/// preserving Twitch's ordering. Unmanaged Twitch rewards and orphaned
/// records are skipped.
fn zip_rewards(twitch: Vec<TwitchReward>, data: Vec<InternalCustomReward>) -> Vec<Reward> {
    let mut internal: HashMap<String, InternalCustomReward> = data
        .into_iter()
        .map(|record| (record.id.clone(), record))
        .collect();

    let rewards: Vec<Reward> = twitch
        .into_iter()
        .filter_map(|twitch| {
            let record = internal.remove(&twitch.id)?;
            Some(Reward {
                twitch,
                data: record.data,
                live_delay: record.live_delay,
                auto_accept: record.auto_accept,
            })
        })
        .collect();

    for orphan in internal.keys() {
        warn!("Reward record {} has no Twitch reward, skipping", orphan);
    }

    rewards
}

/// Pull the server's error message out of a failed response.
async fn error_message(response: reqwest::Response) -> String {
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));

    let message = if is_json {
        response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| body.get("error")?.as_str().map(String::from))
    } else {
        response.text().await.ok().filter(|text| !text.is_empty())
    };

    message.unwrap_or_else(|| "An error occurred.".to_string())
}
