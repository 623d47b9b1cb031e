//! Webhook HTTP server.
//!
//! `GET /webhook` answers a liveness text. `POST /webhook` verifies the
//! signature, checks the batch shape, and hands the events to the
//! [`EventDispatcher`]. Failures only show up as the response status.

use crate::dispatcher::EventDispatcher;
use crate::line::signature::{self, SIGNATURE_HEADER};
use crate::line::WebhookEvent;
use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::get,
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

pub const WEBHOOK_PATH: &str = "/webhook";
pub const LISTENING_TEXT: &str = "I am listening. Please access with POST.";

#[derive(Clone)]
pub struct AppState {
    dispatcher: Arc<EventDispatcher>,
    /// `None` disables signature verification
    channel_secret: Option<Arc<str>>,
}

impl AppState {
    pub fn new(dispatcher: EventDispatcher, channel_secret: Option<String>) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            channel_secret: channel_secret.map(Arc::from),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(WEBHOOK_PATH, get(listening).post(webhook))
        .with_state(state)
}

/// Serve until Ctrl-C
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    let address = listener.local_addr().context("Failed to read listen address")?;
    info!(address = %address, path = WEBHOOK_PATH, "Webhook server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Webhook server failed")?;

    info!("Webhook server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn listening() -> &'static str {
    LISTENING_TEXT
}

async fn webhook(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> StatusCode {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());
    process_webhook(&state, signature, &body).await
}

/// Handle one webhook call and pick the response status
pub async fn process_webhook(state: &AppState, signature: Option<&str>, body: &[u8]) -> StatusCode {
    if let Some(secret) = state.channel_secret.as_deref() {
        let valid = signature.is_some_and(|sig| signature::verify(secret, body, sig));
        if !valid {
            warn!(has_signature = signature.is_some(), "Rejected webhook with invalid signature");
            return StatusCode::UNAUTHORIZED;
        }
    }

    let payload: Value = match serde_json::from_slice(body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "Webhook body is not JSON");
            return StatusCode::INTERNAL_SERVER_ERROR;
        }
    };

    if let Some(destination) = payload.get("destination").and_then(Value::as_str) {
        info!(destination = %destination, "Destination User ID");
    }

    let Some(raw_events) = payload.get("events").filter(|events| events.is_array()) else {
        warn!("Webhook body has no events array");
        return StatusCode::INTERNAL_SERVER_ERROR;
    };

    let events: Vec<WebhookEvent> = match serde_json::from_value(raw_events.clone()) {
        Ok(events) => events,
        Err(e) => {
            warn!(error = %e, "Webhook events are malformed");
            return StatusCode::INTERNAL_SERVER_ERROR;
        }
    };

    match state.dispatcher.dispatch_all(&events).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            error!(error = %e, "Webhook batch failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
