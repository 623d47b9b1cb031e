//! Jikan API v4 response types.
//!
//! Only the fields the bot reads are modelled; everything else in the payload
//! is ignored. Deserializing into these types is the schema check for
//! upstream data.

use crate::catalog::AnimeSummary;
use serde::{Deserialize, Serialize};

/// List response shared by `/top/anime` and `/anime` (search).
///
/// `data` is optional so a search that reports nothing can be told apart from
/// a malformed body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimeListResponse {
    #[serde(default)]
    pub data: Option<Vec<AnimeEntry>>,
}

/// Anime entry in a top list or search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimeEntry {
    pub url: String,
    #[serde(default)]
    pub images: Option<AnimeImages>,
    pub title: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub rank: Option<u32>,
}

/// Anime images
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimeImages {
    #[serde(default)]
    pub jpg: Option<ImageSet>,
    #[serde(default)]
    pub webp: Option<ImageSet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSet {
    #[serde(default)]
    pub image_url: Option<String>,
}

impl AnimeEntry {
    /// Regular-size JPG cover, falling back to WebP
    pub fn cover_url(&self) -> Option<&str> {
        let images = self.images.as_ref()?;
        images
            .jpg
            .as_ref()
            .and_then(|set| set.image_url.as_deref())
            .or_else(|| images.webp.as_ref().and_then(|set| set.image_url.as_deref()))
    }
}

impl From<AnimeEntry> for AnimeSummary {
    fn from(entry: AnimeEntry) -> Self {
        let image_url = entry.cover_url().map(str::to_string);
        Self {
            title: entry.title,
            score: entry.score,
            rank: entry.rank,
            image_url,
            url: entry.url,
        }
    }
}

/// Error response from Jikan API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JikanError {
    pub status: u16,
    pub message: String,
    #[serde(default, rename = "type")]
    pub error_type: Option<String>,
}
