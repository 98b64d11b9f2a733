use async_trait::async_trait;
use cinevision_model::{MediaDetails, MediaKey, SearchPage};

/// Errors from catalog provider round-trips.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Not found")]
    NotFound,

    #[error("Rate limited")]
    RateLimited,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Boundary to the remote catalog.
///
/// Implementations hand back already-ingested pages: entries that are not
/// movies or shows, or that carry no id, never reach the engine.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Run a ranked title search. `page` is 1-based.
    async fn search(&self, query: &str, page: u32) -> Result<SearchPage, ProviderError>;

    /// Fetch enriched metadata for a single title.
    async fn details(&self, key: MediaKey) -> Result<MediaDetails, ProviderError>;

    /// Provider name for logging.
    fn name(&self) -> &'static str;

    /// Base URL that image paths are joined onto.
    fn image_base_url(&self) -> &str;
}
