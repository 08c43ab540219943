//! Auth request and response bodies.

use std::fmt;

use jam3a::{
    users::User,
    validation::{
        Field, ValidationErrors, require, validate_email, validate_name, validate_password,
        validate_phone,
    },
};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// Body of `POST /auth/login`.
#[derive(Clone, Serialize)]
pub struct Credentials {
    /// Account email.
    pub email: String,

    /// Account password.
    pub password: String,
}

impl Credentials {
    /// Check both fields are present and the email is well formed.
    ///
    /// # Errors
    ///
    /// Returns the collected [`ValidationErrors`].
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        errors.check(validate_email(&self.email));
        errors.check(require(Field::Password, &self.password));

        errors.into_result()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

impl Drop for Credentials {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

/// Body of `POST /auth/register`.
#[derive(Clone, Serialize)]
pub struct Registration {
    /// Display name.
    pub name: String,

    /// Account email.
    pub email: String,

    /// Contact phone.
    pub phone: String,

    /// Chosen password.
    pub password: String,
}

impl Registration {
    /// Check every field, collecting all failures.
    ///
    /// # Errors
    ///
    /// Returns the collected [`ValidationErrors`].
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        errors.check(validate_name(&self.name));
        errors.check(validate_email(&self.email));
        errors.check(validate_phone(&self.phone));
        errors.check(validate_password(&self.password));

        errors.into_result()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"**redacted**")
            .finish()
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

/// Response of `/auth/login` and `/auth/register`.
#[derive(Deserialize)]
pub(crate) struct SessionRecord {
    #[serde(alias = "accessToken")]
    pub(crate) token: String,

    pub(crate) user: User,
}

/// Response of `POST /auth/seller-application`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationReceipt {
    /// Application reference for follow-up.
    #[serde(alias = "id", alias = "_id", alias = "applicationId")]
    pub reference: String,

    /// Review status, e.g. `pending`.
    #[serde(default)]
    pub status: Option<String>,
}
