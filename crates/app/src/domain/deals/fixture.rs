//! Offline deals, served from the bundled catalog.
//!
//! Joins are counted in memory for the lifetime of the process; every other write needs
//! the backend.

use async_trait::async_trait;
use jam3a::{
    deals::{Deal, DealId},
    fixtures::Fixture,
    join::JoinRequest,
    wizard::start_jam3a::StartJam3aRequest,
};
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::deals::{DealFilter, DealUpdate, DealsService, DealsServiceError};

/// Deals from a loaded [`Fixture`].
#[derive(Debug)]
pub struct FixtureDealsService {
    deals: RwLock<Vec<Deal>>,
    joined: RwLock<Vec<DealId>>,
}

impl FixtureDealsService {
    /// Serve the deals of `fixture`.
    #[must_use]
    pub fn new(fixture: &Fixture) -> Self {
        Self {
            deals: RwLock::new(fixture.deals().to_vec()),
            joined: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl DealsService for FixtureDealsService {
    async fn list_deals(&self, filter: DealFilter) -> Result<Vec<Deal>, DealsServiceError> {
        let deals = self.deals.read().await;
        let joined = self.joined.read().await;

        Ok(deals
            .iter()
            .filter(|deal| {
                filter
                    .category
                    .as_deref()
                    .is_none_or(|category| deal.category.eq_ignore_ascii_case(category.trim()))
            })
            .filter(|deal| !filter.joined || joined.contains(&deal.id))
            .cloned()
            .collect())
    }

    async fn get_deal(&self, deal: DealId) -> Result<Deal, DealsServiceError> {
        self.deals
            .read()
            .await
            .iter()
            .find(|candidate| candidate.id == deal)
            .cloned()
            .ok_or(DealsServiceError::NotFound)
    }

    async fn join_deal(&self, request: JoinRequest) -> Result<(), DealsServiceError> {
        let mut deals = self.deals.write().await;

        let deal = deals
            .iter_mut()
            .find(|candidate| candidate.id == request.deal_id)
            .ok_or(DealsServiceError::NotFound)?;

        *deal = deal.with_joined_participant();

        self.joined.write().await.push(request.deal_id.clone());

        debug!(deal = %request.deal_id, "counted offline join");

        Ok(())
    }

    async fn create_deal(&self, _request: StartJam3aRequest) -> Result<Deal, DealsServiceError> {
        Err(DealsServiceError::Offline)
    }

    async fn update_deal(
        &self,
        _deal: DealId,
        _update: DealUpdate,
    ) -> Result<Deal, DealsServiceError> {
        Err(DealsServiceError::Offline)
    }

    async fn delete_deal(&self, _deal: DealId) -> Result<(), DealsServiceError> {
        Err(DealsServiceError::Offline)
    }
}

#[cfg(test)]
mod tests {
    use jam3a::{deals::Participation, validation::PaymentMethod};
    use jiff::Timestamp;
    use testresult::TestResult;

    use super::*;

    fn service() -> Result<FixtureDealsService, jam3a::fixtures::FixtureError> {
        let fixture = Fixture::bundled(Timestamp::now())?;

        Ok(FixtureDealsService::new(&fixture))
    }

    fn join_request(deal: &str) -> JoinRequest {
        JoinRequest {
            deal_id: DealId::new(deal),
            name: "Reem".to_string(),
            email: "reem@example.com".to_string(),
            phone: "0551234567".to_string(),
            payment_method: PaymentMethod::Mada,
        }
    }

    #[tokio::test]
    async fn filters_by_category() -> TestResult {
        let service = service()?;

        let kitchen = service
            .list_deals(DealFilter {
                category: Some("Kitchen".to_string()),
                joined: false,
            })
            .await?;

        assert!(!kitchen.is_empty(), "bundled catalog has kitchen deals");
        assert!(kitchen.iter().all(|deal| deal.category == "kitchen"));

        Ok(())
    }

    #[tokio::test]
    async fn joins_count_in_memory_and_show_up_as_joined() -> TestResult {
        let service = service()?;
        let before = service.get_deal(DealId::new("jam-air-fryer")).await?;

        service.join_deal(join_request("jam-air-fryer")).await?;

        let after = service.get_deal(DealId::new("jam-air-fryer")).await?;
        let mine = service
            .list_deals(DealFilter {
                category: None,
                joined: true,
            })
            .await?;

        assert_eq!(
            after.participants,
            Participation::new(before.participants.current + 1, before.participants.required)
        );
        assert_eq!(mine.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_deals_and_writes_fail() -> TestResult {
        let service = service()?;

        assert!(
            matches!(
                service.get_deal(DealId::new("nope")).await,
                Err(DealsServiceError::NotFound)
            ),
            "unknown id should be NotFound"
        );
        assert!(
            matches!(
                service.delete_deal(DealId::new("jam-air-fryer")).await,
                Err(DealsServiceError::Offline)
            ),
            "deletes need the backend"
        );

        Ok(())
    }
}
