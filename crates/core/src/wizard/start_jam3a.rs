//! Start a Jam3a
//!
//! A shopper picks a product, sizes the group, optionally invites friends and pays their
//! share up front. The starter counts as the first participant, so at most `size - 1`
//! invitations can be sent.

use std::{fmt, str::FromStr};

use jiff::SignedDuration;
use serde::Serialize;
use thiserror::Error;

use crate::{
    locale::Language,
    validation::{
        Field, FieldError, FieldErrorKind, PaymentMethod, ValidationErrors, validate_accepted,
        validate_email, validate_payment,
    },
    wizard::{WizardForm, WizardStep},
};

/// Smallest group.
pub const MIN_GROUP_SIZE: u32 = 2;

/// Largest group.
pub const MAX_GROUP_SIZE: u32 = 50;

/// Group size a new form starts with.
pub const DEFAULT_GROUP_SIZE: u32 = 5;

/// Deal window lengths on offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DealDuration {
    /// One day.
    Hours24,
    /// Two days.
    Hours48,
    /// Three days.
    Hours72,
    /// One week.
    Days7,
}

impl DealDuration {
    /// Every option, shortest first.
    pub const ALL: [Self; 4] = [Self::Hours24, Self::Hours48, Self::Hours72, Self::Days7];

    /// Window length in hours.
    #[must_use]
    pub const fn hours(self) -> i64 {
        match self {
            Self::Hours24 => 24,
            Self::Hours48 => 48,
            Self::Hours72 => 72,
            Self::Days7 => 168,
        }
    }

    /// Window length.
    #[must_use]
    pub const fn duration(self) -> SignedDuration {
        SignedDuration::from_hours(self.hours())
    }

    /// Identifier used on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hours24 => "24h",
            Self::Hours48 => "48h",
            Self::Hours72 => "72h",
            Self::Days7 => "7d",
        }
    }

    /// Option text.
    #[must_use]
    pub const fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (Self::Hours24, Language::English) => "24 hours",
            (Self::Hours24, Language::Arabic) => "24 ساعة",
            (Self::Hours48, Language::English) => "48 hours",
            (Self::Hours48, Language::Arabic) => "48 ساعة",
            (Self::Hours72, Language::English) => "72 hours",
            (Self::Hours72, Language::Arabic) => "72 ساعة",
            (Self::Days7, Language::English) => "7 days",
            (Self::Days7, Language::Arabic) => "7 أيام",
        }
    }
}

impl fmt::Display for DealDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned for durations not on offer.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported deal duration: {0} (expected 24h, 48h, 72h or 7d)")]
pub struct UnsupportedDuration(pub String);

impl FromStr for DealDuration {
    type Err = UnsupportedDuration;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalised = value.trim().to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|duration| duration.as_str() == normalised)
            .ok_or_else(|| UnsupportedDuration(value.to_string()))
    }
}

/// Start-Jam3a steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartStep {
    /// Pick the product.
    Product,
    /// Size and window.
    Group,
    /// Invite friends.
    Invite,
    /// Payment and terms.
    Review,
}

impl WizardStep for StartStep {
    fn name(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Group => "group",
            Self::Invite => "invite",
            Self::Review => "review",
        }
    }

    fn title(self, language: Language) -> &'static str {
        match (self, language) {
            (Self::Product, Language::English) => "Choose a product",
            (Self::Product, Language::Arabic) => "اختر المنتج",
            (Self::Group, Language::English) => "Set up your group",
            (Self::Group, Language::Arabic) => "إعداد المجموعة",
            (Self::Invite, Language::English) => "Invite friends",
            (Self::Invite, Language::Arabic) => "ادعُ أصدقاءك",
            (Self::Review, Language::English) => "Review and pay",
            (Self::Review, Language::Arabic) => "المراجعة والدفع",
        }
    }
}

/// Start-Jam3a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartJam3aForm {
    /// Selected product.
    pub product_id: Option<String>,
    /// Participants needed, the starter included.
    pub group_size: u32,
    /// Deal window.
    pub duration: Option<DealDuration>,
    /// Emails to invite.
    pub invitees: Vec<String>,
    /// Payment for the starter's share.
    pub payment: Option<PaymentMethod>,
    /// Terms accepted.
    pub accepted_terms: bool,
}

impl Default for StartJam3aForm {
    fn default() -> Self {
        Self {
            product_id: None,
            group_size: DEFAULT_GROUP_SIZE,
            duration: None,
            invitees: Vec::new(),
            payment: None,
            accepted_terms: false,
        }
    }
}

impl StartJam3aForm {
    /// Invitations allowed for the current group size.
    #[must_use]
    pub fn max_invitees(&self) -> usize {
        usize::try_from(self.group_size.saturating_sub(1)).unwrap_or(usize::MAX)
    }

    fn invitee_emails(&self) -> impl Iterator<Item = &str> {
        self.invitees
            .iter()
            .map(|email| email.trim())
            .filter(|email| !email.is_empty())
    }
}

/// Body of `POST /deals`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartJam3aRequest {
    /// Product the deal is for.
    pub product_id: String,
    /// Participants needed.
    pub target_size: u32,
    /// Window length in hours.
    pub duration_hours: i64,
    /// Emails to invite.
    pub invitees: Vec<String>,
    /// Payment for the starter's share.
    pub payment_method: PaymentMethod,
}

impl WizardForm for StartJam3aForm {
    type Step = StartStep;
    type Submission = StartJam3aRequest;

    const STEPS: &'static [StartStep] = &[
        StartStep::Product,
        StartStep::Group,
        StartStep::Invite,
        StartStep::Review,
    ];

    fn validate_step(&self, step: StartStep) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        match step {
            StartStep::Product => {
                if self
                    .product_id
                    .as_deref()
                    .is_none_or(|id| id.trim().is_empty())
                {
                    errors.push(FieldError::new(Field::Product, FieldErrorKind::Required));
                }
            }
            StartStep::Group => {
                if !(MIN_GROUP_SIZE..=MAX_GROUP_SIZE).contains(&self.group_size) {
                    errors.push(FieldError::new(
                        Field::GroupSize,
                        FieldErrorKind::OutOfRange {
                            min: MIN_GROUP_SIZE,
                            max: MAX_GROUP_SIZE,
                        },
                    ));
                }

                if self.duration.is_none() {
                    errors.push(FieldError::new(Field::Duration, FieldErrorKind::Required));
                }
            }
            StartStep::Invite => {
                let max = self.max_invitees();

                if self.invitee_emails().count() > max {
                    errors.push(FieldError::new(
                        Field::Invitees,
                        FieldErrorKind::TooMany { max },
                    ));
                }

                if self
                    .invitee_emails()
                    .any(|email| validate_email(email).is_err())
                {
                    errors.push(FieldError::new(Field::Invitees, FieldErrorKind::InvalidEmail));
                }
            }
            StartStep::Review => {
                errors.check(validate_payment(self.payment));
                errors.check(validate_accepted(self.accepted_terms));
            }
        }

        errors.into_result()
    }

    fn submission(&self) -> Option<StartJam3aRequest> {
        Some(StartJam3aRequest {
            product_id: self.product_id.as_deref()?.trim().to_string(),
            target_size: self.group_size,
            duration_hours: self.duration?.hours(),
            invitees: self.invitee_emails().map(str::to_string).collect(),
            payment_method: self.payment?,
        })
    }
}
