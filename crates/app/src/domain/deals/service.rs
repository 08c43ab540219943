//! Deals service.

use std::sync::Arc;

use async_trait::async_trait;
use jam3a::{
    deals::{Deal, DealId},
    join::JoinRequest,
    wizard::start_jam3a::StartJam3aRequest,
};
use jiff::Timestamp;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    api::{ApiClient, envelope},
    domain::deals::{
        errors::DealsServiceError,
        records::{DealFilter, DealRecord, DealUpdate},
    },
};

/// Deals backed by the REST API.
#[derive(Debug, Clone)]
pub struct HttpDealsService {
    api: Arc<ApiClient>,
}

impl HttpDealsService {
    /// Service calling `api`.
    #[must_use]
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl DealsService for HttpDealsService {
    async fn list_deals(&self, filter: DealFilter) -> Result<Vec<Deal>, DealsServiceError> {
        let body = self.api.get("deals", &filter.query()).await?;
        let fetched_at = Timestamp::now();

        let page = envelope::list::<DealRecord>(body).map_err(DealsServiceError::Api)?;

        debug!(count = page.items.len(), total = ?page.total, "fetched deals");

        Ok(page
            .items
            .into_iter()
            .map(|record| record.into_deal(fetched_at))
            .collect())
    }

    async fn get_deal(&self, deal: DealId) -> Result<Deal, DealsServiceError> {
        let body = self.api.get(&format!("deals/{deal}"), &[]).await?;
        let fetched_at = Timestamp::now();

        let record = envelope::single::<DealRecord>(body).map_err(DealsServiceError::Api)?;

        Ok(record.into_deal(fetched_at))
    }

    async fn join_deal(&self, request: JoinRequest) -> Result<(), DealsServiceError> {
        self.api
            .post(&format!("deals/{}/join", request.deal_id), &request)
            .await?;

        info!(deal = %request.deal_id, "joined deal");

        Ok(())
    }

    async fn create_deal(&self, request: StartJam3aRequest) -> Result<Deal, DealsServiceError> {
        let body = self.api.post("deals", &request).await?;
        let fetched_at = Timestamp::now();

        let deal = envelope::single::<DealRecord>(body)
            .map_err(DealsServiceError::Api)?
            .into_deal(fetched_at);

        info!(deal = %deal.id, product = %request.product_id, "started deal");

        Ok(deal)
    }

    async fn update_deal(
        &self,
        deal: DealId,
        update: DealUpdate,
    ) -> Result<Deal, DealsServiceError> {
        let body = self.api.put(&format!("deals/{deal}"), &update).await?;
        let fetched_at = Timestamp::now();

        let record = envelope::single::<DealRecord>(body).map_err(DealsServiceError::Api)?;

        Ok(record.into_deal(fetched_at))
    }

    async fn delete_deal(&self, deal: DealId) -> Result<(), DealsServiceError> {
        self.api.delete(&format!("deals/{deal}")).await?;

        info!(%deal, "deleted deal");

        Ok(())
    }
}

/// Group deals: browsing, joining and the seller-side lifecycle.
#[automock]
#[async_trait]
pub trait DealsService: Send + Sync {
    /// Retrieves deals matching `filter`, in backend order.
    ///
    /// # Errors
    ///
    /// Returns [`DealsServiceError`] when the backend call fails.
    async fn list_deals(&self, filter: DealFilter) -> Result<Vec<Deal>, DealsServiceError>;

    /// Retrieve a single deal.
    ///
    /// # Errors
    ///
    /// Returns [`DealsServiceError::NotFound`] for an unknown id.
    async fn get_deal(&self, deal: DealId) -> Result<Deal, DealsServiceError>;

    /// Joins the signed-in user to a deal.
    ///
    /// # Errors
    ///
    /// Returns [`DealsServiceError::Rejected`] when the backend refuses the join.
    async fn join_deal(&self, request: JoinRequest) -> Result<(), DealsServiceError>;

    /// Starts a new deal with the caller as first participant.
    ///
    /// # Errors
    ///
    /// Returns [`DealsServiceError`] when the backend call fails.
    async fn create_deal(&self, request: StartJam3aRequest) -> Result<Deal, DealsServiceError>;

    /// Updates a deal's editable fields.
    ///
    /// # Errors
    ///
    /// Returns [`DealsServiceError::NotFound`] for an unknown id.
    async fn update_deal(
        &self,
        deal: DealId,
        update: DealUpdate,
    ) -> Result<Deal, DealsServiceError>;

    /// Deletes a deal.
    ///
    /// # Errors
    ///
    /// Returns [`DealsServiceError::NotFound`] for an unknown id.
    async fn delete_deal(&self, deal: DealId) -> Result<(), DealsServiceError>;
}
