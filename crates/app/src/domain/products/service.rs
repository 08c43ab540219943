//! Products service.

use std::sync::Arc;

use async_trait::async_trait;
use jam3a::products::Product;
use mockall::automock;
use tracing::{debug, warn};

use crate::{
    api::{ApiClient, ApiError, envelope},
    domain::products::{errors::ProductsServiceError, records::ProductRecord},
    fallback::{Fetched, cache_or_fallback},
    storage::{Storage, StorageExt, StorageKey},
};

/// Products backed by the REST API, cached for offline use.
#[derive(Debug, Clone)]
pub struct HttpProductsService {
    api: Arc<ApiClient>,
    storage: Arc<dyn Storage>,
}

impl HttpProductsService {
    /// Service calling `api` and caching into `storage`.
    #[must_use]
    pub fn new(api: Arc<ApiClient>, storage: Arc<dyn Storage>) -> Self {
        Self { api, storage }
    }

    async fn fetch_records(&self) -> Result<Vec<ProductRecord>, ApiError> {
        let body = self.api.get("products", &[]).await?;

        Ok(envelope::list::<ProductRecord>(body)?.items)
    }

    fn cached_product(&self, product: &str) -> Option<Product> {
        let records = match self.storage.load::<Vec<ProductRecord>>(StorageKey::Products) {
            Ok(records) => records?,
            Err(error) => {
                warn!(%error, "cached products unreadable");
                return None;
            }
        };

        records
            .into_iter()
            .map(ProductRecord::into_product)
            .find(|candidate| candidate.id == product)
    }
}

#[async_trait]
impl ProductsService for HttpProductsService {
    async fn list_products(
        &self,
        category: Option<String>,
    ) -> Result<Fetched<Vec<Product>>, ProductsServiceError> {
        let fetched = cache_or_fallback(
            self.storage.as_ref(),
            StorageKey::Products,
            self.fetch_records().await,
        )?;

        debug!(count = fetched.value.len(), origin = ?fetched.origin, "listed products");

        Ok(fetched.map(|records| in_category(records, category.as_deref())))
    }

    async fn get_product(&self, product: String) -> Result<Fetched<Product>, ProductsServiceError> {
        let result = self.api.get(&format!("products/{product}"), &[]).await;

        match result.and_then(envelope::single::<ProductRecord>) {
            Ok(record) => Ok(Fetched::network(record.into_product())),
            Err(error) if error.is_unavailable() => self
                .cached_product(&product)
                .map(Fetched::cached)
                .ok_or(ProductsServiceError::Api(error)),
            Err(error) => Err(error.into()),
        }
    }
}

fn in_category(records: Vec<ProductRecord>, category: Option<&str>) -> Vec<Product> {
    let category = category.map(str::trim).filter(|category| !category.is_empty());

    records
        .into_iter()
        .filter(|record| {
            category.is_none_or(|category| record.category().eq_ignore_ascii_case(category))
        })
        .map(ProductRecord::into_product)
        .collect()
}

/// Product catalog.
#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products, optionally narrowed to one category.
    ///
    /// # Errors
    ///
    /// Returns [`ProductsServiceError::Api`] when the backend fails and nothing is cached.
    async fn list_products(
        &self,
        category: Option<String>,
    ) -> Result<Fetched<Vec<Product>>, ProductsServiceError>;

    /// Retrieve a single product.
    ///
    /// # Errors
    ///
    /// Returns [`ProductsServiceError::NotFound`] for an unknown id.
    async fn get_product(&self, product: String) -> Result<Fetched<Product>, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use crate::{config::client::ClientConfig, session::SessionStore, storage::MemoryStorage};

    use super::*;

    fn records() -> Result<Vec<ProductRecord>, serde_json::Error> {
        serde_json::from_value(json!([
            { "id": "p-1", "name": "Kettle", "category": "kitchen", "price": 99 },
            { "id": "p-2", "name": "Dates", "category": "grocery", "price": 45 }
        ]))
    }

    fn unreachable_service(storage: Arc<MemoryStorage>) -> Result<HttpProductsService, ApiError> {
        let config = ClientConfig {
            api_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
            ..ClientConfig::default()
        };
        let api = ApiClient::new(&config, SessionStore::new(storage.clone()))?;

        Ok(HttpProductsService::new(Arc::new(api), storage))
    }

    #[test]
    fn category_filter_ignores_case() -> TestResult {
        let products = in_category(records()?, Some("Kitchen"));

        assert_eq!(products.len(), 1);
        assert_eq!(products.first().map(|p| p.id.as_str()), Some("p-1"));
        assert_eq!(in_category(records()?, None).len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn unreachable_backend_serves_cached_products() -> TestResult {
        let storage = Arc::new(MemoryStorage::new());
        storage.save(StorageKey::Products, &records()?)?;

        let service = unreachable_service(storage)?;

        let listed = service.list_products(Some("grocery".to_string())).await?;
        let single = service.get_product("p-1".to_string()).await?;

        assert!(listed.is_cached(), "expected the cached list");
        assert_eq!(listed.value.len(), 1);
        assert!(single.is_cached(), "expected the cached product");
        assert_eq!(single.value.name.en, "Kettle");

        Ok(())
    }

    #[tokio::test]
    async fn unreachable_backend_without_cache_fails() -> TestResult {
        let service = unreachable_service(Arc::new(MemoryStorage::new()))?;

        assert!(
            matches!(
                service.list_products(None).await,
                Err(ProductsServiceError::Api(_))
            ),
            "nothing cached to fall back to"
        );

        Ok(())
    }
}
