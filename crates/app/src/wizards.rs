//! Wizard submission
//!
//! Sends the request a finished wizard produces and reports the outcome back, so the
//! wizard either confirms with the backend reference or returns to its last step with
//! the form intact.

use jam3a::{
    deals::Deal,
    wizard::{Wizard, WizardError, seller::SellerForm, start_jam3a::StartJam3aForm},
};
use thiserror::Error;
use tracing::warn;

use crate::domain::{
    auth::{ApplicationReceipt, AuthService, AuthServiceError},
    deals::{DealsService, DealsServiceError},
};

/// Wizard submission errors.
#[derive(Debug, Error)]
pub enum WizardSubmitError {
    /// The wizard refused to submit.
    #[error(transparent)]
    Wizard(#[from] WizardError),

    /// The seller application was refused.
    #[error(transparent)]
    Auth(#[from] AuthServiceError),

    /// The deal could not be created.
    #[error(transparent)]
    Deals(#[from] DealsServiceError),
}

/// Submit a completed seller onboarding wizard.
///
/// # Errors
///
/// - [`WizardSubmitError::Wizard`]: a step is incomplete or the wizard is not on its last
///   step. Nothing is sent.
/// - [`WizardSubmitError::Auth`]: the backend refused the application.
pub async fn submit_seller_application(
    wizard: &mut Wizard<SellerForm>,
    auth: &dyn AuthService,
) -> Result<ApplicationReceipt, WizardSubmitError> {
    let application = wizard.submit()?;

    match auth.submit_seller_application(application).await {
        Ok(receipt) => {
            wizard.confirm(receipt.reference.clone())?;
            Ok(receipt)
        }
        Err(error) => {
            warn!(%error, "seller application failed");
            wizard.submission_failed()?;
            Err(error.into())
        }
    }
}

/// Submit a completed Start-Jam3a wizard, creating the deal.
///
/// # Errors
///
/// - [`WizardSubmitError::Wizard`]: a step is incomplete or the wizard is not on its last
///   step. Nothing is sent.
/// - [`WizardSubmitError::Deals`]: the backend refused the deal.
pub async fn start_jam3a(
    wizard: &mut Wizard<StartJam3aForm>,
    deals: &dyn DealsService,
) -> Result<Deal, WizardSubmitError> {
    let request = wizard.submit()?;

    match deals.create_deal(request).await {
        Ok(deal) => {
            wizard.confirm(deal.id.to_string())?;
            Ok(deal)
        }
        Err(error) => {
            warn!(%error, "starting a jam3a failed");
            wizard.submission_failed()?;
            Err(error.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use jam3a::{
        fixtures::Fixture,
        validation::PaymentMethod,
        wizard::{
            WizardState,
            seller::SellerStep,
            start_jam3a::{DealDuration, StartStep},
        },
    };
    use jiff::Timestamp;
    use mockall::predicate::*;
    use testresult::TestResult;

    use crate::domain::{auth::MockAuthService, deals::MockDealsService};

    use super::*;

    fn seller_form() -> SellerForm {
        SellerForm {
            owner_name: "Faisal Al-Harbi".to_string(),
            email: "faisal@store.sa".to_string(),
            phone: "0551234567".to_string(),
            business_name: "Harbi Electronics".to_string(),
            commercial_registration: "1010654321".to_string(),
            city: "Riyadh".to_string(),
            categories: vec!["electronics".to_string()],
            description: "Phones, tablets and accessories at fair prices.".to_string(),
            iban: "SA03 8000 0000 6080 1016 7519".to_string(),
            accepted_terms: true,
        }
    }

    fn start_form() -> StartJam3aForm {
        StartJam3aForm {
            product_id: Some("prod-kettle".to_string()),
            group_size: 4,
            duration: Some(DealDuration::Hours72),
            invitees: vec!["friend@example.sa".to_string()],
            payment: Some(PaymentMethod::CreditCard),
            accepted_terms: true,
        }
    }

    fn on_last_step<F: jam3a::wizard::WizardForm>(
        form: F,
    ) -> Result<Wizard<F>, WizardError> {
        let mut wizard = Wizard::new(form)?;

        while !wizard.is_last_step() {
            wizard.forward()?;
        }

        Ok(wizard)
    }

    #[tokio::test]
    async fn accepted_application_confirms_with_its_reference() -> TestResult {
        let mut wizard = on_last_step(seller_form())?;

        let mut auth = MockAuthService::new();
        auth.expect_submit_seller_application()
            .with(function(|application: &jam3a::wizard::seller::SellerApplication| {
                application.iban == "SA0380000000608010167519"
            }))
            .once()
            .returning(|_| {
                Ok(ApplicationReceipt {
                    reference: "app-42".to_string(),
                    status: Some("pending".to_string()),
                })
            });

        let receipt = submit_seller_application(&mut wizard, &auth).await?;

        assert_eq!(receipt.reference, "app-42");
        assert_eq!(
            wizard.state(),
            &WizardState::Confirmed {
                reference: "app-42".to_string()
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn refused_application_returns_to_review() -> TestResult {
        let mut wizard = on_last_step(seller_form())?;

        let mut auth = MockAuthService::new();
        auth.expect_submit_seller_application()
            .once()
            .returning(|_| Err(AuthServiceError::Rejected("already applied".to_string())));

        let result = submit_seller_application(&mut wizard, &auth).await;

        assert!(matches!(
            result,
            Err(WizardSubmitError::Auth(AuthServiceError::Rejected(_)))
        ));
        assert_eq!(wizard.current_step(), Some(SellerStep::Review));
        assert_eq!(wizard.form().business_name, "Harbi Electronics");

        Ok(())
    }

    #[tokio::test]
    async fn incomplete_wizard_sends_nothing() -> TestResult {
        let mut wizard = Wizard::new(seller_form())?;

        let mut auth = MockAuthService::new();
        auth.expect_submit_seller_application().never();

        assert!(matches!(
            submit_seller_application(&mut wizard, &auth).await,
            Err(WizardSubmitError::Wizard(WizardError::NotOnLastStep))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn started_jam3a_confirms_with_the_new_deal() -> TestResult {
        let created = Fixture::bundled(Timestamp::now())?
            .into_deals()
            .into_iter()
            .next()
            .ok_or("empty bundled catalog")?;
        let reference = created.id.to_string();

        let mut wizard = on_last_step(start_form())?;

        let mut deals = MockDealsService::new();
        deals
            .expect_create_deal()
            .with(function(
                |request: &jam3a::wizard::start_jam3a::StartJam3aRequest| {
                    request.target_size == 4 && request.duration_hours == 72
                },
            ))
            .once()
            .returning(move |_| Ok(created.clone()));

        let deal = start_jam3a(&mut wizard, &deals).await?;

        assert_eq!(deal.id.to_string(), reference);
        assert_eq!(wizard.state(), &WizardState::Confirmed { reference });

        Ok(())
    }

    #[tokio::test]
    async fn refused_jam3a_keeps_the_form() -> TestResult {
        let mut wizard = on_last_step(start_form())?;

        let mut deals = MockDealsService::new();
        deals
            .expect_create_deal()
            .once()
            .returning(|_| Err(DealsServiceError::Rejected("product unavailable".to_string())));

        assert!(start_jam3a(&mut wizard, &deals).await.is_err());
        assert_eq!(wizard.current_step(), Some(StartStep::Review));
        assert_eq!(wizard.form().group_size, 4);

        Ok(())
    }
}
