//! Text command routing.
//!
//! Each text message is handled on its own; nothing is remembered between
//! messages. [`route`] decides the branch without I/O, and [`CommandRouter`]
//! performs exactly one catalog call (or profile lookup) for it and replies.

use crate::carousel::build_cards;
use crate::line::{EventSource, Message, MessagingPlatform, PlatformError};
use crate::reply;
use jikan_catalog::{AnimeCatalog, TopList};
use std::sync::Arc;
use tracing::{error, info};

/// What a text message asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Greeting,
    Top(TopList),
    /// Free-text search with the normalized query
    Search(String),
}

/// Map a raw text message to its branch
pub fn route(text: &str) -> Route {
    let normalized = text.trim().to_lowercase();
    match normalized.as_str() {
        "hello" => Route::Greeting,
        "1" => Route::Top(TopList::Airing),
        "2" => Route::Top(TopList::Movies),
        "3" => Route::Top(TopList::Upcoming),
        "4" => Route::Top(TopList::ByPopularity),
        "5" => Route::Top(TopList::Favorited),
        _ => Route::Search(normalized),
    }
}

/// Answers text messages using the catalog and the messaging platform
#[derive(Clone)]
pub struct CommandRouter {
    catalog: Arc<dyn AnimeCatalog>,
    platform: Arc<dyn MessagingPlatform>,
}

impl CommandRouter {
    pub fn new(catalog: Arc<dyn AnimeCatalog>, platform: Arc<dyn MessagingPlatform>) -> Self {
        Self { catalog, platform }
    }

    /// Reply to one text message.
    ///
    /// Never fails: catalog problems are already degraded, and platform
    /// errors are logged here.
    pub async fn handle_text(&self, text: &str, reply_token: &str, source: Option<&EventSource>) {
        if let Err(e) = self.respond(text, reply_token, source).await {
            error!(reply_token = %reply_token, error = %e, "Failed to answer text message");
        }
    }

    async fn respond(
        &self,
        text: &str,
        reply_token: &str,
        source: Option<&EventSource>,
    ) -> Result<(), PlatformError> {
        let route = route(text);
        info!(reply_token = %reply_token, route = ?route, "Routing text message");

        let messages = self.compose(route, text, source).await?;
        self.platform.reply(reply_token, messages).await
    }

    async fn compose(
        &self,
        route: Route,
        text: &str,
        source: Option<&EventSource>,
    ) -> Result<Vec<Message>, PlatformError> {
        let messages = match route {
            Route::Greeting => match source.and_then(|s| s.user_id.as_deref()) {
                Some(user_id) => {
                    let profile = self.platform.profile(user_id).await?;
                    reply::greeting(&profile.display_name)
                }
                None => reply::profile_unavailable(),
            },
            Route::Top(list) => {
                let found = self.catalog.fetch_top(list).await;
                if found.is_empty() {
                    // An empty carousel is rejected by the platform
                    reply::top_list_unavailable(list)
                } else {
                    reply::top_list_results(list, build_cards(&found))
                }
            }
            Route::Search(query) => {
                // No results and a failed search read the same to the user
                match self.catalog.search_by_title(&query).await.into_matches() {
                    Some(found) => reply::search_results(text, build_cards(&found)),
                    None => reply::not_found(text),
                }
            }
        };
        Ok(messages)
    }
}
