//! Anime catalog library backed by the Jikan API v4.
//!
//! Fetches ranked top lists and title searches from MyAnimeList (through
//! Jikan) and normalizes them into [`AnimeSummary`] values. Callers depend on
//! the [`AnimeCatalog`] trait, whose methods never fail: upstream problems are
//! logged and degraded to an empty list or [`SearchOutcome::Failed`].

pub mod api;
pub mod catalog;
pub mod error;

pub use api::JikanClient;
pub use catalog::{AnimeCatalog, AnimeSummary, SearchOutcome, TopList, MAX_RESULTS};
pub use error::CatalogError;
