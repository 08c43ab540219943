//! Join controller
//!
//! Drives a [`JoinFlow`] against the deals service: fetches the deal when opened, sends
//! the join request exactly once per accepted submission and reports the outcome back to
//! the flow.

use std::sync::Arc;

use jam3a::{
    deals::DealId,
    join::{JoinFlow, JoinFlowError, JoinForm},
    locale::Language,
};
use jiff::Timestamp;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::deals::{DealsService, DealsServiceError};

/// Join controller errors.
#[derive(Debug, Error)]
pub enum JoinError {
    /// The flow rejected the event.
    #[error(transparent)]
    Flow(#[from] JoinFlowError),

    /// The join request failed.
    #[error(transparent)]
    Deals(#[from] DealsServiceError),
}

/// User-facing text for a failed deals request.
#[must_use]
pub fn failure_message(error: &DealsServiceError, language: Language) -> String {
    match (error, language) {
        (DealsServiceError::Rejected(message), _) => message.clone(),
        (DealsServiceError::NotFound, Language::English) => "This deal could not be found.".into(),
        (DealsServiceError::NotFound, Language::Arabic) => "لم يتم العثور على هذا العرض.".into(),
        (DealsServiceError::Unauthorized { .. }, Language::English) => {
            "Please sign in to join this deal.".into()
        }
        (DealsServiceError::Unauthorized { .. }, Language::Arabic) => {
            "يرجى تسجيل الدخول للانضمام إلى هذا العرض.".into()
        }
        (_, Language::English) => "Something went wrong. Please try again.".into(),
        (_, Language::Arabic) => "حدث خطأ ما. يرجى المحاولة مرة أخرى.".into(),
    }
}

/// One join screen.
pub struct JoinController {
    deals: Arc<dyn DealsService>,
    flow: JoinFlow,
    language: Language,
}

impl std::fmt::Debug for JoinController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JoinController")
            .field("flow", &self.flow)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

impl JoinController {
    /// Open the join screen for `deal` and fetch it.
    ///
    /// A failed fetch leaves the flow in its error state; see [`Self::retry`].
    pub async fn open(deals: Arc<dyn DealsService>, deal: DealId, language: Language) -> Self {
        let mut controller = Self {
            deals,
            flow: JoinFlow::new(deal),
            language,
        };

        controller.load().await;

        controller
    }

    async fn load(&mut self) {
        let deal = self.flow.deal_id().clone();

        let outcome = match self.deals.get_deal(deal.clone()).await {
            Ok(loaded) => self.flow.loaded(loaded),
            Err(error) => {
                warn!(%deal, %error, "failed to load deal");
                self.flow.load_failed(failure_message(&error, self.language))
            }
        };

        if let Err(error) = outcome {
            warn!(%deal, %error, "join flow ignored load result");
        }
    }

    /// Fetch the deal again after a failed load.
    ///
    /// # Errors
    ///
    /// Returns [`JoinFlowError::InvalidTransition`] unless loading previously failed.
    pub async fn retry(&mut self) -> Result<(), JoinFlowError> {
        self.flow.retry()?;
        self.load().await;

        Ok(())
    }

    /// Flow state.
    #[must_use]
    pub fn flow(&self) -> &JoinFlow {
        &self.flow
    }

    /// Editable form, when shown.
    pub fn form_mut(&mut self) -> Option<&mut JoinForm> {
        self.flow.form_mut()
    }

    /// Submit the form and send the join request.
    ///
    /// # Errors
    ///
    /// - [`JoinError::Flow`]: the flow refused the submission (already submitting, invalid
    ///   fields, deal no longer open, or no form shown). Nothing is sent.
    /// - [`JoinError::Deals`]: the request failed; the form is kept for a resubmit.
    pub async fn submit(&mut self, now: Timestamp) -> Result<(), JoinError> {
        let request = self.flow.submit(now)?;
        let deal = request.deal_id.clone();

        match self.deals.join_deal(request).await {
            Ok(()) => {
                self.flow.join_succeeded()?;
                info!(%deal, "joined deal");

                Ok(())
            }
            Err(error) => {
                warn!(%deal, %error, "join request failed");
                self.flow.join_failed(failure_message(&error, self.language))?;

                Err(error.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use jam3a::{
        deals::Deal,
        fixtures::Fixture,
        join::{JoinFailure, JoinState},
        validation::PaymentMethod,
    };
    use mockall::predicate::*;
    use testresult::TestResult;

    use crate::domain::deals::MockDealsService;

    use super::*;

    fn open_deal(now: Timestamp) -> Result<Deal, Box<dyn std::error::Error>> {
        Fixture::bundled(now)?
            .into_deals()
            .into_iter()
            .find(|deal| deal.id.as_str() == "jam-air-fryer")
            .ok_or_else(|| "bundled catalog lost the air fryer".into())
    }

    fn fill(form: &mut JoinForm) {
        form.name = "Noura Al-Qahtani".to_string();
        form.email = "noura@example.sa".to_string();
        form.phone = "0501234567".to_string();
        form.payment = Some(PaymentMethod::Mada);
    }

    #[tokio::test]
    async fn successful_join_sends_one_request() -> TestResult {
        let now = Timestamp::now();
        let deal = open_deal(now)?;
        let before = deal.participants.current;

        let mut service = MockDealsService::new();
        service
            .expect_get_deal()
            .with(eq(DealId::new("jam-air-fryer")))
            .once()
            .returning(move |_| Ok(deal.clone()));
        service.expect_join_deal().once().returning(|_| Ok(()));

        let mut controller = JoinController::open(
            Arc::new(service),
            DealId::new("jam-air-fryer"),
            Language::English,
        )
        .await;

        fill(controller.form_mut().ok_or("form not shown")?);
        controller.submit(now).await?;

        match controller.flow().state() {
            JoinState::Success { deal, invitation } => {
                assert_eq!(deal.participants.current, before + 1);
                assert_eq!(invitation.share_path, "/jam3a/join/jam-air-fryer");
            }
            other => return Err(format!("unexpected state {}", other.name()).into()),
        }

        assert!(matches!(
            controller.submit(now).await,
            Err(JoinError::Flow(JoinFlowError::InvalidTransition { .. }))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn invalid_form_sends_nothing() -> TestResult {
        let now = Timestamp::now();
        let deal = open_deal(now)?;

        let mut service = MockDealsService::new();
        service
            .expect_get_deal()
            .returning(move |_| Ok(deal.clone()));
        service.expect_join_deal().never();

        let mut controller = JoinController::open(
            Arc::new(service),
            DealId::new("jam-air-fryer"),
            Language::English,
        )
        .await;

        assert!(matches!(
            controller.submit(now).await,
            Err(JoinError::Flow(JoinFlowError::Invalid(_)))
        ));
        assert!(controller.form_mut().is_some());

        Ok(())
    }

    #[tokio::test]
    async fn failed_join_keeps_the_form_for_a_resubmit() -> TestResult {
        let now = Timestamp::now();
        let deal = open_deal(now)?;

        let attempts = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&attempts);

        let mut service = MockDealsService::new();
        service
            .expect_get_deal()
            .returning(move |_| Ok(deal.clone()));
        service.expect_join_deal().times(2).returning(move |_| {
            if counted.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(DealsServiceError::Rejected("payment declined".to_string()))
            } else {
                Ok(())
            }
        });

        let mut controller = JoinController::open(
            Arc::new(service),
            DealId::new("jam-air-fryer"),
            Language::English,
        )
        .await;

        fill(controller.form_mut().ok_or("form not shown")?);

        assert!(matches!(
            controller.submit(now).await,
            Err(JoinError::Deals(DealsServiceError::Rejected(_)))
        ));

        match controller.flow().state() {
            JoinState::Error { failure, form, .. } => {
                assert_eq!(failure, &JoinFailure::Network("payment declined".to_string()));
                assert_eq!(form.email, "noura@example.sa");
            }
            other => return Err(format!("unexpected state {}", other.name()).into()),
        }

        controller.submit(now).await?;

        assert_eq!(attempts.load(Ordering::SeqCst), 2);
        assert!(matches!(controller.flow().state(), JoinState::Success { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn failed_load_can_be_retried() -> TestResult {
        let now = Timestamp::now();
        let deal = open_deal(now)?;

        let attempts = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&attempts);

        let mut service = MockDealsService::new();
        service.expect_get_deal().times(2).returning(move |_| {
            if counted.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(DealsServiceError::NotFound)
            } else {
                Ok(deal.clone())
            }
        });

        let mut controller = JoinController::open(
            Arc::new(service),
            DealId::new("jam-air-fryer"),
            Language::Arabic,
        )
        .await;

        match controller.flow().state() {
            JoinState::Error {
                deal: None,
                failure,
                ..
            } => {
                assert_eq!(
                    failure,
                    &JoinFailure::Load("لم يتم العثور على هذا العرض.".to_string())
                );
            }
            other => return Err(format!("unexpected state {}", other.name()).into()),
        }

        controller.retry().await?;

        assert!(matches!(controller.flow().state(), JoinState::Ready { .. }));

        Ok(())
    }
}
