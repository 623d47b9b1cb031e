//! Jikan API client.

use super::types::*;
use crate::catalog::{AnimeCatalog, AnimeSummary, SearchOutcome, TopList, MAX_RESULTS};
use crate::error::CatalogError;
use async_trait::async_trait;
use reqwest::Client;
use shared::config::JikanConfig;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Jikan API v4 client
#[derive(Debug, Clone)]
pub struct JikanClient {
    /// HTTP client
    client: Client,
    /// Base URL for Jikan API
    base_url: String,
}

impl JikanClient {
    /// Create a new Jikan client
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from the `[jikan]` config section
    pub fn from_config(config: &JikanConfig) -> Result<Self, CatalogError> {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
            &config.user_agent,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a single GET request and decode the JSON body
    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(url = %url, ?query, "Making API request");

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            // Jikan reports errors as JSON; keep the raw body otherwise
            let body = serde_json::from_str::<JikanError>(&body)
                .map(|e| e.message)
                .unwrap_or(body);

            warn!(url = %url, status = %status, error = %body, "Request failed");
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let data = serde_json::from_slice(&bytes)?;
        debug!(url = %url, "Request successful");
        Ok(data)
    }

    /// Fetch the first page of a ranked list, capped at [`MAX_RESULTS`]
    pub async fn top_anime(&self, list: TopList) -> Result<Vec<AnimeSummary>, CatalogError> {
        info!(list = %list, "Fetching top anime");
        let (key, value) = list.query_param();
        let response: AnimeListResponse = self
            .get("/top/anime", &[(key, value), ("page", "1")])
            .await?;

        let entries = response.data.ok_or(CatalogError::MissingField("data"))?;
        Ok(truncate(entries))
    }

    /// Search anime by title, capped at [`MAX_RESULTS`].
    ///
    /// Returns `Ok(None)` when the API reports no results.
    pub async fn search_anime(
        &self,
        title: &str,
    ) -> Result<Option<Vec<AnimeSummary>>, CatalogError> {
        info!(query = %title, "Searching anime by title");
        let response: AnimeListResponse = self
            .get("/anime", &[("q", title), ("page", "1")])
            .await?;

        match response.data {
            Some(entries) if !entries.is_empty() => Ok(Some(truncate(entries))),
            _ => Ok(None),
        }
    }
}

fn truncate(entries: Vec<AnimeEntry>) -> Vec<AnimeSummary> {
    entries
        .into_iter()
        .take(MAX_RESULTS)
        .map(AnimeSummary::from)
        .collect()
}

#[async_trait]
impl AnimeCatalog for JikanClient {
    async fn fetch_top(&self, list: TopList) -> Vec<AnimeSummary> {
        match self.top_anime(list).await {
            Ok(found) => found,
            Err(e) => {
                error!(list = %list, error = %e, "Failed to fetch top anime");
                Vec::new()
            }
        }
    }

    async fn search_by_title(&self, title: &str) -> SearchOutcome {
        match self.search_anime(title).await {
            Ok(Some(found)) => SearchOutcome::Matches(found),
            Ok(None) => {
                info!(query = %title, "No anime matched the query");
                SearchOutcome::NoResults
            }
            Err(e) => {
                error!(query = %title, error = %e, "Failed to search anime");
                SearchOutcome::Failed
            }
        }
    }
}
