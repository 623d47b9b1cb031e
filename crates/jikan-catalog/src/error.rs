use thiserror::Error;

/// Upstream failures of the catalog API.
///
/// These never reach the chat layer: [`crate::AnimeCatalog`] implementations
/// log them and degrade to an empty result.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("Response is missing the `{0}` field")]
    MissingField(&'static str),
}
