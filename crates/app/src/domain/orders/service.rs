//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    api::{ApiClient, envelope},
    domain::orders::{
        errors::OrdersServiceError,
        records::{NewOrder, Order, OrderRecord},
    },
};

/// Orders backed by the REST API.
#[derive(Debug, Clone)]
pub struct HttpOrdersService {
    api: Arc<ApiClient>,
}

impl HttpOrdersService {
    /// Service calling `api`.
    #[must_use]
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl OrdersService for HttpOrdersService {
    async fn place_order(&self, order: NewOrder) -> Result<Order, OrdersServiceError> {
        let body = self.api.post("orders", &order).await?;
        let placed = envelope::single::<OrderRecord>(body)
            .map_err(OrdersServiceError::Api)?
            .into_order();

        info!(order = %placed.id, items = order.items.len(), "order placed");

        Ok(placed)
    }

    async fn list_orders(&self) -> Result<Vec<Order>, OrdersServiceError> {
        let body = self.api.get("orders", &[]).await?;
        let page = envelope::list::<OrderRecord>(body).map_err(OrdersServiceError::Api)?;

        Ok(page.items.into_iter().map(OrderRecord::into_order).collect())
    }
}

/// Orders placed from the cart.
#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Places an order.
    ///
    /// # Errors
    ///
    /// Returns [`OrdersServiceError::Rejected`] when the backend refuses the order.
    async fn place_order(&self, order: NewOrder) -> Result<Order, OrdersServiceError>;

    /// Retrieves the signed-in user's orders.
    ///
    /// # Errors
    ///
    /// Returns [`OrdersServiceError::Unauthorized`] without a valid session.
    async fn list_orders(&self) -> Result<Vec<Order>, OrdersServiceError>;
}
