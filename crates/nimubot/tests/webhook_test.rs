mod common;

use axum::http::StatusCode;
use common::*;
use nimubot::line::signature;
use nimubot::server::process_webhook;
use nimubot::AppState;
use serde_json::json;
use std::sync::Arc;

const SECRET: &str = "channel-secret";

fn state(catalog: &Arc<FakeCatalog>, platform: &Arc<RecordingPlatform>, secret: Option<&str>) -> AppState {
    AppState::new(dispatcher(catalog, platform), secret.map(str::to_string))
}

#[tokio::test]
async fn test_signed_batch_is_dispatched() {
    let catalog = Arc::new(FakeCatalog::with_results());
    let platform = Arc::new(RecordingPlatform::default());
    let state = state(&catalog, &platform, Some(SECRET));

    let body = serde_json::to_vec(&json!({
        "destination": "Ubot",
        "events": [text_event_json("replytoken1", "1")]
    }))
    .unwrap();
    let sig = signature::sign(SECRET, &body).unwrap();

    let status = process_webhook(&state, Some(sig.as_str()), &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(platform.replies().len(), 1);
}

#[tokio::test]
async fn test_bad_signature_is_rejected_before_dispatch() {
    let catalog = Arc::new(FakeCatalog::with_results());
    let platform = Arc::new(RecordingPlatform::default());
    let state = state(&catalog, &platform, Some(SECRET));

    let body = serde_json::to_vec(&json!({
        "events": [text_event_json("replytoken1", "1")]
    }))
    .unwrap();
    let forged = signature::sign("other-secret", &body).unwrap();

    assert_eq!(
        process_webhook(&state, Some(forged.as_str()), &body).await,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        process_webhook(&state, None, &body).await,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(catalog.total_calls(), 0);
    assert!(platform.replies().is_empty());
}

#[tokio::test]
async fn test_events_must_be_an_array() {
    let catalog = Arc::new(FakeCatalog::with_results());
    let platform = Arc::new(RecordingPlatform::default());
    let state = state(&catalog, &platform, None);

    for body in [
        json!({ "events": { "type": "message" } }),
        json!({ "events": null }),
        json!({ "destination": "Ubot" }),
    ] {
        let body = serde_json::to_vec(&body).unwrap();
        assert_eq!(
            process_webhook(&state, None, &body).await,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    assert_eq!(
        process_webhook(&state, None, b"not json").await,
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(catalog.total_calls(), 0);
}

#[tokio::test]
async fn test_failed_event_fails_request() {
    let catalog = Arc::new(FakeCatalog::with_results());
    let platform = Arc::new(RecordingPlatform::default());
    let state = state(&catalog, &platform, None);

    let body = serde_json::to_vec(&json!({
        "events": [
            text_event_json("replytoken1", "5"),
            {
                "type": "message",
                "replyToken": "replytoken2",
                "source": { "type": "user", "userId": "U1234" },
                "message": { "id": "9", "type": "sticker", "packageId": "1", "stickerId": "1" }
            }
        ]
    }))
    .unwrap();

    assert_eq!(
        process_webhook(&state, None, &body).await,
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert!(platform.reply_for("replytoken1").is_some());
}

#[tokio::test]
async fn test_verification_probe_succeeds_silently() {
    let catalog = Arc::new(FakeCatalog::with_results());
    let platform = Arc::new(RecordingPlatform::default());
    let state = state(&catalog, &platform, Some(SECRET));

    let body = serde_json::to_vec(&json!({
        "destination": "Ubot",
        "events": [text_event_json("00000000000000000000000000000000", "test")]
    }))
    .unwrap();
    let sig = signature::sign(SECRET, &body).unwrap();

    assert_eq!(process_webhook(&state, Some(sig.as_str()), &body).await, StatusCode::OK);
    assert_eq!(catalog.total_calls(), 0);
    assert!(platform.replies().is_empty());
}
