//! Webhook event dispatch.

use crate::line::{EventKind, MessageKind, MessagingPlatform, PlatformError, WebhookEvent};
use crate::reply;
use crate::router::CommandRouter;
use futures::future::join_all;
use jikan_catalog::AnimeCatalog;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Unknown message: {0}")]
    UnsupportedMessage(String),

    #[error("Follow event has no user id")]
    MissingUserId,

    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// Webhook connectivity probes carry a reply token made of one repeated
/// character, e.g. `00000000000000000000000000000000`.
pub fn is_probe_token(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => chars.all(|c| c == first),
        None => false,
    }
}

/// Routes each event of a webhook batch to its handler
#[derive(Clone)]
pub struct EventDispatcher {
    router: CommandRouter,
    platform: Arc<dyn MessagingPlatform>,
}

impl EventDispatcher {
    pub fn new(catalog: Arc<dyn AnimeCatalog>, platform: Arc<dyn MessagingPlatform>) -> Self {
        Self {
            router: CommandRouter::new(catalog, Arc::clone(&platform)),
            platform,
        }
    }

    /// Handle every event concurrently and wait for all of them.
    ///
    /// Fails with the first error in batch order if any event failed; replies
    /// already sent for other events stay sent.
    pub async fn dispatch_all(&self, events: &[WebhookEvent]) -> Result<(), DispatchError> {
        debug!(events = events.len(), "Dispatching webhook batch");

        let results = join_all(events.iter().map(|event| self.handle_event(event))).await;

        let mut first_error = None;
        for (index, result) in results.into_iter().enumerate() {
            if let Err(e) = result {
                error!(event_index = index, error = %e, "Event handling failed");
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub async fn handle_event(&self, event: &WebhookEvent) -> Result<(), DispatchError> {
        if let Some(token) = event.reply_token.as_deref().filter(|t| is_probe_token(t)) {
            info!(reply_token = %token, message = ?event.message, "Test hook received");
            return Ok(());
        }

        match event.kind {
            EventKind::Message => self.handle_message(event).await,
            EventKind::Follow => self.handle_follow(event).await,
            EventKind::Other => {
                debug!(event = ?event, "Ignoring event");
                Ok(())
            }
        }
    }

    async fn handle_message(&self, event: &WebhookEvent) -> Result<(), DispatchError> {
        let message = match &event.message {
            Some(message) if message.kind == MessageKind::Text => message,
            other => {
                let payload = serde_json::to_string(other).unwrap_or_default();
                return Err(DispatchError::UnsupportedMessage(payload));
            }
        };

        let Some(reply_token) = event.reply_token.as_deref() else {
            warn!("Text message without reply token, nothing to answer");
            return Ok(());
        };

        let text = message.text.as_deref().unwrap_or_default();
        self.router
            .handle_text(text, reply_token, event.source.as_ref())
            .await;
        Ok(())
    }

    async fn handle_follow(&self, event: &WebhookEvent) -> Result<(), DispatchError> {
        let user_id = event
            .source
            .as_ref()
            .and_then(|s| s.user_id.as_deref())
            .ok_or(DispatchError::MissingUserId)?;

        let Some(reply_token) = event.reply_token.as_deref() else {
            warn!(user_id = %user_id, "Follow event without reply token, nothing to answer");
            return Ok(());
        };

        info!(user_id = %user_id, "New follower");
        let profile = self.platform.profile(user_id).await?;
        self.platform
            .reply(reply_token, reply::welcome(&profile.display_name))
            .await?;
        Ok(())
    }
}
