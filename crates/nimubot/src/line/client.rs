//! Messaging API client.

use super::platform::{MessagingPlatform, PlatformError, MAX_REPLY_MESSAGES};
use super::types::{LineApiError, Message, ReplyRequest, UserProfile};
use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::config::LineConfig;
use std::time::Duration;
use tracing::{debug, warn};

/// LINE Messaging API client
#[derive(Debug, Clone)]
pub struct LineClient {
    client: Client,
    api_base_url: String,
    channel_access_token: String,
}

impl LineClient {
    pub fn new(
        api_base_url: impl Into<String>,
        channel_access_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, PlatformError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            channel_access_token: channel_access_token.into(),
        })
    }

    /// Create a client from the `[line]` config section
    pub fn from_config(config: &LineConfig) -> Result<Self, PlatformError> {
        Self::new(
            config.api_base_url.clone(),
            config.channel_access_token.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Turn a non-2xx response into [`PlatformError::Status`]
    async fn check(url: &str, response: Response) -> Result<Response, PlatformError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let body = serde_json::from_str::<LineApiError>(&body)
            .map(|e| e.message)
            .unwrap_or(body);

        warn!(url = %url, status = %status, error = %body, "Messaging API request failed");
        Err(PlatformError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl MessagingPlatform for LineClient {
    async fn reply(&self, reply_token: &str, messages: Vec<Message>) -> Result<(), PlatformError> {
        if messages.is_empty() || messages.len() > MAX_REPLY_MESSAGES {
            return Err(PlatformError::InvalidMessageCount {
                count: messages.len(),
            });
        }

        let url = format!("{}/v2/bot/message/reply", self.api_base_url);
        debug!(reply_token = %reply_token, messages = messages.len(), "Sending reply");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.channel_access_token)
            .json(&ReplyRequest {
                reply_token,
                messages: &messages,
            })
            .send()
            .await?;

        Self::check(&url, response).await?;
        Ok(())
    }

    async fn profile(&self, user_id: &str) -> Result<UserProfile, PlatformError> {
        let url = format!("{}/v2/bot/profile/{}", self.api_base_url, user_id);
        debug!(user_id = %user_id, "Fetching user profile");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.channel_access_token)
            .send()
            .await?;

        let profile: UserProfile = Self::check(&url, response).await?.json().await?;
        Ok(profile)
    }
}
