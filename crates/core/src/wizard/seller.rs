//! Seller onboarding

use serde::Serialize;

use crate::{
    locale::Language,
    validation::{
        Field, FieldError, FieldErrorKind, ValidationErrors, min_length, require,
        validate_accepted, validate_commercial_registration, validate_email, validate_iban,
        validate_name, validate_phone,
    },
    wizard::{WizardForm, WizardStep},
};

/// Minimum length of the store description.
pub const MIN_DESCRIPTION_CHARS: usize = 20;

/// Seller onboarding steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SellerStep {
    /// Owner contact details.
    Account,
    /// Registered business details.
    Business,
    /// What the store sells.
    Catalog,
    /// Where payouts go.
    Payout,
    /// Summary and terms.
    Review,
}

impl WizardStep for SellerStep {
    fn name(self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::Business => "business",
            Self::Catalog => "catalog",
            Self::Payout => "payout",
            Self::Review => "review",
        }
    }

    fn title(self, language: Language) -> &'static str {
        match (self, language) {
            (Self::Account, Language::English) => "Your account",
            (Self::Account, Language::Arabic) => "حسابك",
            (Self::Business, Language::English) => "Business details",
            (Self::Business, Language::Arabic) => "بيانات المنشأة",
            (Self::Catalog, Language::English) => "What you sell",
            (Self::Catalog, Language::Arabic) => "منتجاتك",
            (Self::Payout, Language::English) => "Payouts",
            (Self::Payout, Language::Arabic) => "التحويلات",
            (Self::Review, Language::English) => "Review and submit",
            (Self::Review, Language::Arabic) => "المراجعة والإرسال",
        }
    }
}

/// Seller onboarding form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SellerForm {
    /// Owner name.
    pub owner_name: String,
    /// Owner email.
    pub email: String,
    /// Owner phone.
    pub phone: String,
    /// Registered business name.
    pub business_name: String,
    /// Ten-digit commercial registration number.
    pub commercial_registration: String,
    /// City of operation.
    pub city: String,
    /// Product categories the store sells.
    pub categories: Vec<String>,
    /// Store description.
    pub description: String,
    /// Payout IBAN.
    pub iban: String,
    /// Terms accepted.
    pub accepted_terms: bool,
}

/// Body of `POST /auth/seller-application`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerApplication {
    /// Owner name.
    pub owner_name: String,
    /// Owner email.
    pub email: String,
    /// Owner phone.
    pub phone: String,
    /// Registered business name.
    pub business_name: String,
    /// Commercial registration number.
    pub commercial_registration: String,
    /// City of operation.
    pub city: String,
    /// Product categories.
    pub categories: Vec<String>,
    /// Store description.
    pub description: String,
    /// IBAN without spaces, upper-cased.
    pub iban: String,
}

impl WizardForm for SellerForm {
    type Step = SellerStep;
    type Submission = SellerApplication;

    const STEPS: &'static [SellerStep] = &[
        SellerStep::Account,
        SellerStep::Business,
        SellerStep::Catalog,
        SellerStep::Payout,
        SellerStep::Review,
    ];

    fn validate_step(&self, step: SellerStep) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        match step {
            SellerStep::Account => {
                errors.check(validate_name(&self.owner_name));
                errors.check(validate_email(&self.email));
                errors.check(validate_phone(&self.phone));
            }
            SellerStep::Business => {
                errors.check(require(Field::BusinessName, &self.business_name));
                errors.check(validate_commercial_registration(
                    &self.commercial_registration,
                ));
                errors.check(require(Field::City, &self.city));
            }
            SellerStep::Catalog => {
                if self.categories.iter().all(|category| category.trim().is_empty()) {
                    errors.push(FieldError::new(Field::Categories, FieldErrorKind::Required));
                }

                errors.check(
                    require(Field::Description, &self.description).and_then(|()| {
                        min_length(Field::Description, &self.description, MIN_DESCRIPTION_CHARS)
                    }),
                );
            }
            SellerStep::Payout => errors.check(validate_iban(&self.iban)),
            SellerStep::Review => errors.check(validate_accepted(self.accepted_terms)),
        }

        errors.into_result()
    }

    fn submission(&self) -> Option<SellerApplication> {
        Some(SellerApplication {
            owner_name: self.owner_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            business_name: self.business_name.trim().to_string(),
            commercial_registration: self.commercial_registration.trim().to_string(),
            city: self.city.trim().to_string(),
            categories: self
                .categories
                .iter()
                .map(|category| category.trim().to_string())
                .filter(|category| !category.is_empty())
                .collect(),
            description: self.description.trim().to_string(),
            iban: self
                .iban
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_ascii_uppercase(),
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::wizard::{Wizard, WizardError, WizardState};

    use super::*;

    fn complete_form() -> SellerForm {
        SellerForm {
            owner_name: "Faisal Al-Harbi".to_string(),
            email: "faisal@store.sa".to_string(),
            phone: "0551234567".to_string(),
            business_name: "Harbi Electronics".to_string(),
            commercial_registration: "1010654321".to_string(),
            city: "Riyadh".to_string(),
            categories: vec!["electronics".to_string()],
            description: "Phones, tablets and accessories at fair prices.".to_string(),
            iban: "sa03 8000 0000 6080 1016 7519".to_string(),
            accepted_terms: true,
        }
    }

    #[test]
    fn business_step_needs_ten_digit_registration() {
        let form = SellerForm {
            commercial_registration: "12345".to_string(),
            ..complete_form()
        };

        let errors = form.validate_step(SellerStep::Business).err().unwrap_or_default();

        assert_eq!(
            errors.for_field(Field::CommercialRegistration).map(|e| e.kind),
            Some(FieldErrorKind::InvalidFormat)
        );
    }

    #[test]
    fn catalog_step_needs_category_and_long_description() {
        let form = SellerForm {
            categories: vec![" ".to_string()],
            description: "Too short".to_string(),
            ..complete_form()
        };

        let errors = form.validate_step(SellerStep::Catalog).err().unwrap_or_default();

        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.for_field(Field::Description).map(|e| e.kind),
            Some(FieldErrorKind::TooShort {
                min: MIN_DESCRIPTION_CHARS
            })
        );
    }

    #[test]
    fn walks_every_step_and_submits_normalised_application() -> TestResult {
        let mut wizard = Wizard::new(complete_form())?;

        while !wizard.is_last_step() {
            wizard.forward()?;
        }

        assert_eq!(wizard.current_step(), Some(SellerStep::Review));

        let application = wizard.submit()?;

        assert_eq!(application.iban, "SA0380000000608010167519");
        assert_eq!(wizard.state(), &WizardState::Submitting);

        Ok(())
    }

    #[test]
    fn unticked_terms_block_submission() -> TestResult {
        let mut wizard = Wizard::new(SellerForm {
            accepted_terms: false,
            ..complete_form()
        })?;

        while !wizard.is_last_step() {
            wizard.forward()?;
        }

        assert!(matches!(
            wizard.submit(),
            Err(WizardError::Invalid { step: "review", .. })
        ));

        Ok(())
    }
}
