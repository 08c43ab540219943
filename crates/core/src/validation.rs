//! Field validation
//!
//! Synchronous, field-level checks shared by the join form and the wizards. A failing field
//! produces a [`FieldError`] whose message is resolved per language when rendered.

use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::locale::Language;

static EMAIL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

static PHONE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^\+?[0-9]{10,15}$").ok());

static SAUDI_IBAN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^SA[0-9]{22}$").ok());

static COMMERCIAL_REGISTRATION: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").ok());

/// Form fields that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Full name.
    Name,
    /// Email address.
    Email,
    /// Phone number.
    Phone,
    /// Password.
    Password,
    /// Payment method selection.
    PaymentMethod,
    /// Business or store name.
    BusinessName,
    /// Commercial registration number.
    CommercialRegistration,
    /// City.
    City,
    /// Product categories.
    Categories,
    /// Free-text description.
    Description,
    /// Payout IBAN.
    Iban,
    /// Terms and conditions acceptance.
    Terms,
    /// Product selection.
    Product,
    /// Group size.
    GroupSize,
    /// Deal duration.
    Duration,
    /// Invited participants.
    Invitees,
}

impl Field {
    /// Field label as shown beside the input.
    #[must_use]
    pub const fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (Self::Name, Language::English) => "Name",
            (Self::Name, Language::Arabic) => "الاسم",
            (Self::Email, Language::English) => "Email",
            (Self::Email, Language::Arabic) => "البريد الإلكتروني",
            (Self::Phone, Language::English) => "Phone",
            (Self::Phone, Language::Arabic) => "رقم الجوال",
            (Self::Password, Language::English) => "Password",
            (Self::Password, Language::Arabic) => "كلمة المرور",
            (Self::PaymentMethod, Language::English) => "Payment method",
            (Self::PaymentMethod, Language::Arabic) => "طريقة الدفع",
            (Self::BusinessName, Language::English) => "Business name",
            (Self::BusinessName, Language::Arabic) => "اسم المتجر",
            (Self::CommercialRegistration, Language::English) => "Commercial registration",
            (Self::CommercialRegistration, Language::Arabic) => "السجل التجاري",
            (Self::City, Language::English) => "City",
            (Self::City, Language::Arabic) => "المدينة",
            (Self::Categories, Language::English) => "Categories",
            (Self::Categories, Language::Arabic) => "الفئات",
            (Self::Description, Language::English) => "Description",
            (Self::Description, Language::Arabic) => "الوصف",
            (Self::Iban, Language::English) => "IBAN",
            (Self::Iban, Language::Arabic) => "رقم الآيبان",
            (Self::Terms, Language::English) => "Terms",
            (Self::Terms, Language::Arabic) => "الشروط والأحكام",
            (Self::Product, Language::English) => "Product",
            (Self::Product, Language::Arabic) => "المنتج",
            (Self::GroupSize, Language::English) => "Group size",
            (Self::GroupSize, Language::Arabic) => "حجم المجموعة",
            (Self::Duration, Language::English) => "Duration",
            (Self::Duration, Language::Arabic) => "المدة",
            (Self::Invitees, Language::English) => "Invitees",
            (Self::Invitees, Language::Arabic) => "المدعوون",
        }
    }
}

/// Why a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// Nothing was entered or selected.
    Required,
    /// Not shaped like `local@domain.tld`.
    InvalidEmail,
    /// Not 10 to 15 digits with an optional leading `+`.
    InvalidPhone,
    /// Does not match the expected format.
    InvalidFormat,
    /// Shorter than the minimum length.
    TooShort {
        /// Minimum number of characters.
        min: usize,
    },
    /// Outside the allowed numeric range.
    OutOfRange {
        /// Inclusive minimum.
        min: u32,
        /// Inclusive maximum.
        max: u32,
    },
    /// More entries than allowed.
    TooMany {
        /// Maximum number of entries.
        max: usize,
    },
    /// A required checkbox was left unticked.
    NotAccepted,
}

/// A single field failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    /// Field that failed.
    pub field: Field,

    /// Failure reason.
    pub kind: FieldErrorKind,
}

impl FieldError {
    /// Build a field error.
    #[must_use]
    pub const fn new(field: Field, kind: FieldErrorKind) -> Self {
        Self { field, kind }
    }

    /// Inline message shown under the field.
    #[must_use]
    pub fn message(&self, language: Language) -> String {
        let label = self.field.label(language);

        match (self.kind, language) {
            (FieldErrorKind::Required, Language::English) => format!("{label} is required"),
            (FieldErrorKind::Required, Language::Arabic) => format!("{label} مطلوب"),
            (FieldErrorKind::InvalidEmail, Language::English) => {
                "Please enter a valid email address".to_string()
            }
            (FieldErrorKind::InvalidEmail, Language::Arabic) => {
                "يرجى إدخال بريد إلكتروني صحيح".to_string()
            }
            (FieldErrorKind::InvalidPhone, Language::English) => {
                "Please enter a valid phone number (10-15 digits)".to_string()
            }
            (FieldErrorKind::InvalidPhone, Language::Arabic) => {
                "يرجى إدخال رقم جوال صحيح (10-15 رقمًا)".to_string()
            }
            (FieldErrorKind::InvalidFormat, Language::English) => format!("{label} is invalid"),
            (FieldErrorKind::InvalidFormat, Language::Arabic) => format!("{label} غير صحيح"),
            (FieldErrorKind::TooShort { min }, Language::English) => {
                format!("{label} must be at least {min} characters")
            }
            (FieldErrorKind::TooShort { min }, Language::Arabic) => {
                format!("{label} يجب ألا يقل عن {min} أحرف")
            }
            (FieldErrorKind::OutOfRange { min, max }, Language::English) => {
                format!("{label} must be between {min} and {max}")
            }
            (FieldErrorKind::OutOfRange { min, max }, Language::Arabic) => {
                format!("{label} يجب أن يكون بين {min} و {max}")
            }
            (FieldErrorKind::TooMany { max }, Language::English) => {
                format!("{label} cannot exceed {max}")
            }
            (FieldErrorKind::TooMany { max }, Language::Arabic) => {
                format!("{label} لا يمكن أن يتجاوز {max}")
            }
            (FieldErrorKind::NotAccepted, Language::English) => {
                "You must accept the terms and conditions".to_string()
            }
            (FieldErrorKind::NotAccepted, Language::Arabic) => {
                "يجب الموافقة على الشروط والأحكام".to_string()
            }
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message(Language::English))
    }
}

/// All field failures for one submission attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct ValidationErrors {
    errors: SmallVec<[FieldError; 4]>,
}

impl ValidationErrors {
    /// Empty error list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure.
    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Record the failure from a single-field check, if any.
    pub fn check(&mut self, result: Result<(), FieldError>) {
        if let Err(error) = result {
            self.push(error);
        }
    }

    /// `true` when nothing failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// First failure recorded for `field`.
    #[must_use]
    pub fn for_field(&self, field: Field) -> Option<&FieldError> {
        self.errors.iter().find(|error| error.field == field)
    }

    /// Iterate failures in the order they were recorded.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Supported payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Mada debit card.
    Mada,
    /// Visa / Mastercard.
    CreditCard,
    /// Apple Pay.
    ApplePay,
    /// STC Pay wallet.
    StcPay,
}

impl PaymentMethod {
    /// Every method, in display order.
    pub const ALL: [Self; 4] = [Self::Mada, Self::CreditCard, Self::ApplePay, Self::StcPay];

    /// Wire identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mada => "mada",
            Self::CreditCard => "credit_card",
            Self::ApplePay => "apple_pay",
            Self::StcPay => "stc_pay",
        }
    }

    /// Option text.
    #[must_use]
    pub const fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (Self::Mada, Language::English) => "Mada",
            (Self::Mada, Language::Arabic) => "مدى",
            (Self::CreditCard, Language::English) => "Credit card",
            (Self::CreditCard, Language::Arabic) => "بطاقة ائتمان",
            (Self::ApplePay, Language::English) => "Apple Pay",
            (Self::ApplePay, Language::Arabic) => "Apple Pay",
            (Self::StcPay, Language::English) => "STC Pay",
            (Self::StcPay, Language::Arabic) => "STC Pay",
        }
    }
}

/// Returned for unknown payment method identifiers.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalised = value.trim().to_ascii_lowercase().replace('-', "_");

        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == normalised)
            .ok_or_else(|| UnknownPaymentMethod(value.to_string()))
    }
}

fn is_match(pattern: &LazyLock<Option<Regex>>, value: &str) -> bool {
    pattern.as_ref().is_some_and(|regex| regex.is_match(value))
}

/// A value must be present after trimming.
///
/// # Errors
///
/// Returns [`FieldErrorKind::Required`] for blank input.
pub fn require(field: Field, value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::new(field, FieldErrorKind::Required));
    }

    Ok(())
}

/// Names must be non-empty.
///
/// # Errors
///
/// Returns [`FieldErrorKind::Required`] for blank names.
pub fn validate_name(name: &str) -> Result<(), FieldError> {
    require(Field::Name, name)
}

/// Emails must look like `local@domain.tld`: `a@b` fails, `a@b.com` passes.
///
/// # Errors
///
/// Returns [`FieldErrorKind::Required`] for blank input and
/// [`FieldErrorKind::InvalidEmail`] for malformed addresses.
pub fn validate_email(email: &str) -> Result<(), FieldError> {
    require(Field::Email, email)?;

    if !is_match(&EMAIL, email.trim()) {
        return Err(FieldError::new(Field::Email, FieldErrorKind::InvalidEmail));
    }

    Ok(())
}

/// Phones must be 10 to 15 digits with an optional leading `+`.
///
/// # Errors
///
/// Returns [`FieldErrorKind::Required`] for blank input and
/// [`FieldErrorKind::InvalidPhone`] otherwise.
pub fn validate_phone(phone: &str) -> Result<(), FieldError> {
    require(Field::Phone, phone)?;

    if !is_match(&PHONE, phone.trim()) {
        return Err(FieldError::new(Field::Phone, FieldErrorKind::InvalidPhone));
    }

    Ok(())
}

/// A payment method must be selected.
///
/// # Errors
///
/// Returns [`FieldErrorKind::Required`] when nothing is selected.
pub fn validate_payment(method: Option<PaymentMethod>) -> Result<(), FieldError> {
    method
        .map(|_| ())
        .ok_or(FieldError::new(Field::PaymentMethod, FieldErrorKind::Required))
}

/// Passwords must be at least eight characters.
///
/// # Errors
///
/// Returns [`FieldErrorKind::Required`] or [`FieldErrorKind::TooShort`].
pub fn validate_password(password: &str) -> Result<(), FieldError> {
    require(Field::Password, password)?;
    min_length(Field::Password, password, 8)
}

/// Text must be at least `min` characters after trimming.
///
/// # Errors
///
/// Returns [`FieldErrorKind::TooShort`].
pub fn min_length(field: Field, value: &str, min: usize) -> Result<(), FieldError> {
    if value.trim().chars().count() < min {
        return Err(FieldError::new(field, FieldErrorKind::TooShort { min }));
    }

    Ok(())
}

/// Saudi IBANs are `SA` followed by 22 digits; spaces are ignored.
///
/// # Errors
///
/// Returns [`FieldErrorKind::Required`] or [`FieldErrorKind::InvalidFormat`].
pub fn validate_iban(iban: &str) -> Result<(), FieldError> {
    require(Field::Iban, iban)?;

    let compact = iban
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase();

    if !is_match(&SAUDI_IBAN, &compact) {
        return Err(FieldError::new(Field::Iban, FieldErrorKind::InvalidFormat));
    }

    Ok(())
}

/// Commercial registration numbers are exactly ten digits.
///
/// # Errors
///
/// Returns [`FieldErrorKind::Required`] or [`FieldErrorKind::InvalidFormat`].
pub fn validate_commercial_registration(number: &str) -> Result<(), FieldError> {
    require(Field::CommercialRegistration, number)?;

    if !is_match(&COMMERCIAL_REGISTRATION, number.trim()) {
        return Err(FieldError::new(
            Field::CommercialRegistration,
            FieldErrorKind::InvalidFormat,
        ));
    }

    Ok(())
}

/// A required checkbox must be ticked.
///
/// # Errors
///
/// Returns [`FieldErrorKind::NotAccepted`].
pub fn validate_accepted(accepted: bool) -> Result<(), FieldError> {
    if accepted {
        Ok(())
    } else {
        Err(FieldError::new(Field::Terms, FieldErrorKind::NotAccepted))
    }
}
