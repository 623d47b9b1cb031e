use super::types::{Message, UserProfile};
use async_trait::async_trait;
use thiserror::Error;

/// Most message blocks a single reply may carry
pub const MAX_REPLY_MESSAGES: usize = 5;

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Messaging API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Reply must carry 1 to {max} messages, got {count}", max = MAX_REPLY_MESSAGES)]
    InvalidMessageCount { count: usize },
}

/// Outbound side of the messaging platform
#[async_trait]
pub trait MessagingPlatform: Send + Sync {
    /// Answer an event through its reply token
    async fn reply(&self, reply_token: &str, messages: Vec<Message>) -> Result<(), PlatformError>;

    /// Look up a user's public profile
    async fn profile(&self, user_id: &str) -> Result<UserProfile, PlatformError>;
}
