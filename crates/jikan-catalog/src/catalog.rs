//! Catalog model and the trait the bot talks to.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Maximum number of entries returned by any catalog query
pub const MAX_RESULTS: usize = 10;

/// The fixed ranked lists the catalog can serve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopList {
    Airing,
    Movies,
    Upcoming,
    ByPopularity,
    Favorited,
}

impl TopList {
    pub const ALL: [TopList; 5] = [
        TopList::Airing,
        TopList::Movies,
        TopList::Upcoming,
        TopList::ByPopularity,
        TopList::Favorited,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TopList::Airing => "airing",
            TopList::Movies => "movies",
            TopList::Upcoming => "upcoming",
            TopList::ByPopularity => "bypopularity",
            TopList::Favorited => "favorited",
        }
    }

    /// Query parameter selecting this list on `/top/anime`
    pub fn query_param(&self) -> (&'static str, &'static str) {
        match self {
            TopList::Airing => ("filter", "airing"),
            TopList::Movies => ("type", "movie"),
            TopList::Upcoming => ("filter", "upcoming"),
            TopList::ByPopularity => ("filter", "bypopularity"),
            TopList::Favorited => ("filter", "favorite"),
        }
    }
}

impl std::fmt::Display for TopList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized anime entry, independent of the upstream response shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeSummary {
    pub title: String,
    pub score: Option<f64>,
    pub rank: Option<u32>,
    pub image_url: Option<String>,
    pub url: String,
}

/// Result of a title search.
///
/// `NoResults` means the API answered and had nothing; `Failed` means the
/// request itself went wrong (already logged by the catalog).
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Matches(Vec<AnimeSummary>),
    NoResults,
    Failed,
}

impl SearchOutcome {
    /// The matches, or `None` for both the sentinel and a failure
    pub fn into_matches(self) -> Option<Vec<AnimeSummary>> {
        match self {
            SearchOutcome::Matches(found) if !found.is_empty() => Some(found),
            _ => None,
        }
    }
}

/// Read-only access to the anime catalog.
///
/// Every method performs exactly one upstream call and never returns an
/// error: failures are logged and surface as an empty list or
/// [`SearchOutcome::Failed`].
#[async_trait]
pub trait AnimeCatalog: Send + Sync {
    /// First [`MAX_RESULTS`] entries of a ranked list
    async fn fetch_top(&self, list: TopList) -> Vec<AnimeSummary>;

    /// First [`MAX_RESULTS`] matches for a title query
    async fn search_by_title(&self, title: &str) -> SearchOutcome;

    async fn fetch_top_airing(&self) -> Vec<AnimeSummary> {
        self.fetch_top(TopList::Airing).await
    }

    async fn fetch_top_movies(&self) -> Vec<AnimeSummary> {
        self.fetch_top(TopList::Movies).await
    }

    async fn fetch_top_upcoming(&self) -> Vec<AnimeSummary> {
        self.fetch_top(TopList::Upcoming).await
    }

    async fn fetch_top_by_popularity(&self) -> Vec<AnimeSummary> {
        self.fetch_top(TopList::ByPopularity).await
    }

    async fn fetch_top_favorited(&self) -> Vec<AnimeSummary> {
        self.fetch_top(TopList::Favorited).await
    }
}
