//! Users

use serde::{Deserialize, Serialize};

/// Account roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular shopper.
    Customer,

    /// Approved seller.
    Seller,

    /// Storefront administrator.
    Admin,

    /// Any role this client does not know about.
    #[serde(other)]
    Other,
}

/// Signed-in user profile, as returned by `/auth/me` and `/auth/login`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Backend identifier.
    #[serde(default, alias = "_id")]
    pub id: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Email address.
    #[serde(default)]
    pub email: String,

    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Explicit roles.
    #[serde(default)]
    pub roles: Vec<Role>,

    /// Legacy admin flag.
    #[serde(default)]
    pub is_admin: bool,

    /// Legacy seller flag.
    #[serde(default)]
    pub is_seller: bool,
}

impl User {
    /// Whether the user holds `role`, through either the role list or the legacy flags.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        let flagged = match role {
            Role::Admin => self.is_admin,
            Role::Seller => self.is_seller,
            Role::Customer | Role::Other => false,
        };

        flagged || self.roles.contains(&role)
    }

    /// Greeting name: the display name, or the email when no name is set.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}
