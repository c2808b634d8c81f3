//! User model.
//!
//! Only the fields the role reconciler relies on are modelled; the rest of
//! the Admin API user representation is ignored on deserialization.

use serde::{Deserialize, Serialize};

/// A Keycloak user as returned by `GET /admin/realms/{realm}/users/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier.
    pub id: String,
    /// Username.
    #[serde(default)]
    pub username: String,
    /// Whether the user is enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Realm the user was fetched from. Not part of the wire format.
    #[serde(skip)]
    pub realm_id: String,
}

const fn default_enabled() -> bool {
    true
}

impl User {
    /// Creates a new enabled user.
    #[must_use]
    pub fn new(
        realm_id: impl Into<String>,
        id: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            enabled: true,
            realm_id: realm_id.into(),
        }
    }

    /// Sets the realm the user belongs to.
    #[must_use]
    pub fn in_realm(mut self, realm_id: impl Into<String>) -> Self {
        self.realm_id = realm_id.into();
        self
    }
}
