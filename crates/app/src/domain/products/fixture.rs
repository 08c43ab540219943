//! Offline products, served from the bundled catalog.

use async_trait::async_trait;
use jam3a::{fixtures::Fixture, products::Product};

use crate::{
    domain::products::{ProductsService, ProductsServiceError},
    fallback::Fetched,
};

/// Products from a loaded [`Fixture`], reported as cached.
#[derive(Debug, Clone)]
pub struct FixtureProductsService {
    products: Vec<Product>,
}

impl FixtureProductsService {
    /// Serve the products of `fixture`.
    #[must_use]
    pub fn new(fixture: &Fixture) -> Self {
        Self {
            products: fixture.products().to_vec(),
        }
    }
}

#[async_trait]
impl ProductsService for FixtureProductsService {
    async fn list_products(
        &self,
        category: Option<String>,
    ) -> Result<Fetched<Vec<Product>>, ProductsServiceError> {
        let category = category.as_deref().map(str::trim);

        Ok(Fetched::cached(
            self.products
                .iter()
                .filter(|product| {
                    category.is_none_or(|category| product.category.eq_ignore_ascii_case(category))
                })
                .cloned()
                .collect(),
        ))
    }

    async fn get_product(&self, product: String) -> Result<Fetched<Product>, ProductsServiceError> {
        self.products
            .iter()
            .find(|candidate| candidate.id == product)
            .cloned()
            .map(Fetched::cached)
            .ok_or(ProductsServiceError::NotFound)
    }
}
