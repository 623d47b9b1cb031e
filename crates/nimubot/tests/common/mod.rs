#![allow(dead_code)]

use async_trait::async_trait;
use jikan_catalog::{AnimeCatalog, AnimeSummary, SearchOutcome, TopList};
use nimubot::line::{
    Message, MessagingPlatform, PlatformError, UserProfile, WebhookEvent,
};
use nimubot::EventDispatcher;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

pub fn summaries(count: usize) -> Vec<AnimeSummary> {
    (1..=count)
        .map(|i| AnimeSummary {
            title: format!("Anime number {} with a rather long descriptive title", i),
            score: Some(8.0 + i as f64 / 10.0),
            rank: Some(i as u32),
            image_url: Some(format!("https://cdn.example/{}.jpg", i)),
            url: format!("https://myanimelist.net/anime/{}", i),
        })
        .collect()
}

/// Catalog double that records every call
pub struct FakeCatalog {
    top_result: Vec<AnimeSummary>,
    search_result: SearchOutcome,
    pub top_calls: Mutex<Vec<TopList>>,
    pub search_calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn new(top_result: Vec<AnimeSummary>, search_result: SearchOutcome) -> Self {
        Self {
            top_result,
            search_result,
            top_calls: Mutex::new(Vec::new()),
            search_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_results() -> Self {
        Self::new(summaries(12), SearchOutcome::Matches(summaries(3)))
    }

    pub fn top_calls(&self) -> Vec<TopList> {
        self.top_calls.lock().unwrap().clone()
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().unwrap().clone()
    }

    pub fn total_calls(&self) -> usize {
        self.top_calls().len() + self.search_calls().len()
    }
}

#[async_trait]
impl AnimeCatalog for FakeCatalog {
    async fn fetch_top(&self, list: TopList) -> Vec<AnimeSummary> {
        self.top_calls.lock().unwrap().push(list);
        self.top_result.clone()
    }

    async fn search_by_title(&self, title: &str) -> SearchOutcome {
        self.search_calls.lock().unwrap().push(title.to_string());
        self.search_result.clone()
    }
}

/// Platform double that records replies and profile lookups
#[derive(Default)]
pub struct RecordingPlatform {
    pub fail_profile: bool,
    pub fail_reply: bool,
    pub replies: Mutex<Vec<(String, Vec<Message>)>>,
    pub profile_calls: Mutex<Vec<String>>,
}

impl RecordingPlatform {
    pub fn replies(&self) -> Vec<(String, Vec<Message>)> {
        self.replies.lock().unwrap().clone()
    }

    pub fn reply_for(&self, token: &str) -> Option<Vec<Message>> {
        self.replies()
            .into_iter()
            .find(|(t, _)| t == token)
            .map(|(_, messages)| messages)
    }

    pub fn profile_calls(&self) -> Vec<String> {
        self.profile_calls.lock().unwrap().clone()
    }
}

fn failure() -> PlatformError {
    PlatformError::Status {
        status: 500,
        body: "boom".to_string(),
    }
}

#[async_trait]
impl MessagingPlatform for RecordingPlatform {
    async fn reply(&self, reply_token: &str, messages: Vec<Message>) -> Result<(), PlatformError> {
        if self.fail_reply {
            return Err(failure());
        }
        self.replies
            .lock()
            .unwrap()
            .push((reply_token.to_string(), messages));
        Ok(())
    }

    async fn profile(&self, user_id: &str) -> Result<UserProfile, PlatformError> {
        self.profile_calls.lock().unwrap().push(user_id.to_string());
        if self.fail_profile {
            return Err(failure());
        }
        Ok(UserProfile {
            display_name: "Rin".to_string(),
            user_id: Some(user_id.to_string()),
            picture_url: None,
            status_message: None,
        })
    }
}

pub fn dispatcher(
    catalog: &Arc<FakeCatalog>,
    platform: &Arc<RecordingPlatform>,
) -> EventDispatcher {
    EventDispatcher::new(catalog.clone(), platform.clone())
}

pub fn text_event_json(token: &str, text: &str) -> Value {
    json!({
        "type": "message",
        "replyToken": token,
        "source": { "type": "user", "userId": "U1234" },
        "timestamp": 1700000000000u64,
        "mode": "active",
        "message": { "id": "1", "type": "text", "text": text }
    })
}

pub fn text_event(token: &str, text: &str) -> WebhookEvent {
    serde_json::from_value(text_event_json(token, text)).unwrap()
}

pub fn image_event(token: &str) -> WebhookEvent {
    serde_json::from_value(json!({
        "type": "message",
        "replyToken": token,
        "source": { "type": "user", "userId": "U1234" },
        "message": { "id": "2", "type": "image" }
    }))
    .unwrap()
}

pub fn follow_event(token: &str) -> WebhookEvent {
    serde_json::from_value(json!({
        "type": "follow",
        "replyToken": token,
        "source": { "type": "user", "userId": "U1234" }
    }))
    .unwrap()
}

pub fn texts(messages: &[Message]) -> Vec<String> {
    messages
        .iter()
        .filter_map(|m| match m {
            Message::Text { text } => Some(text.clone()),
            _ => None,
        })
        .collect()
}
