//! Content service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    api::{ApiClient, ApiError, envelope},
    domain::content::{
        errors::ContentServiceError,
        records::{ContentBlock, ContentRecord},
    },
    fallback::{Fetched, cache_or_fallback},
    storage::{Storage, StorageKey},
};

/// Content backed by the REST API, cached for offline use.
#[derive(Debug, Clone)]
pub struct HttpContentService {
    api: Arc<ApiClient>,
    storage: Arc<dyn Storage>,
}

impl HttpContentService {
    /// Service calling `api` and caching into `storage`.
    #[must_use]
    pub fn new(api: Arc<ApiClient>, storage: Arc<dyn Storage>) -> Self {
        Self { api, storage }
    }

    async fn fetch_records(&self) -> Result<Vec<ContentRecord>, ApiError> {
        let body = self.api.get("content", &[]).await?;

        Ok(envelope::list::<ContentRecord>(body)?.items)
    }
}

#[async_trait]
impl ContentService for HttpContentService {
    async fn list_content(&self) -> Result<Fetched<Vec<ContentBlock>>, ContentServiceError> {
        let fetched = cache_or_fallback(
            self.storage.as_ref(),
            StorageKey::Content,
            self.fetch_records().await,
        )?;

        Ok(fetched.map(|records| records.into_iter().map(ContentBlock::from).collect()))
    }
}

/// Storefront content blocks.
#[automock]
#[async_trait]
pub trait ContentService: Send + Sync {
    /// Retrieves every content block.
    ///
    /// # Errors
    ///
    /// Returns [`ContentServiceError::Api`] when the backend fails and nothing is cached.
    async fn list_content(&self) -> Result<Fetched<Vec<ContentBlock>>, ContentServiceError>;
}
