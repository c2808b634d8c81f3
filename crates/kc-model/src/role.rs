//! Role model.
//!
//! Roles are either realm roles (apply across the realm) or client roles
//! (owned by a single client application). The Admin REST API identifies
//! a role by an opaque string id and reports its owner as `containerId`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A Keycloak role as returned by the Admin REST API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Unique identifier.
    pub id: String,
    /// Role name (unique within realm or client).
    pub name: String,
    /// Role description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether this is a composite role.
    #[serde(default)]
    pub composite: bool,
    /// Whether this is a client role.
    #[serde(default)]
    pub client_role: bool,
    /// Container ID (realm ID for realm roles, internal client ID for client roles).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,
}

impl Role {
    /// Creates a new realm role.
    #[must_use]
    pub fn new_realm_role(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            composite: false,
            client_role: false,
            container_id: None,
        }
    }

    /// Creates a new client role owned by `client_id`.
    #[must_use]
    pub fn new_client_role(
        id: impl Into<String>,
        client_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            composite: false,
            client_role: true,
            container_id: Some(client_id.into()),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Checks if this is a realm role.
    #[must_use]
    pub const fn is_realm_role(&self) -> bool {
        !self.client_role
    }

    /// Checks if this is a client role.
    #[must_use]
    pub const fn is_client_role(&self) -> bool {
        self.client_role
    }

    /// Returns the scope that owns this role.
    ///
    /// A client role without a container id falls back to an empty client
    /// id so that it can never be confused with a realm role.
    #[must_use]
    pub fn scope(&self) -> RoleScope {
        if self.client_role {
            RoleScope::Client(self.container_id.clone().unwrap_or_default())
        } else {
            RoleScope::Realm
        }
    }
}

/// The container a role belongs to.
///
/// `Realm` orders before every `Client`, so maps keyed by scope always
/// visit realm roles first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoleScope {
    /// Realm-level roles.
    Realm,
    /// Roles of a client, identified by the client's internal id.
    Client(String),
}

impl RoleScope {
    /// Creates a client scope.
    #[must_use]
    pub fn client(id: impl Into<String>) -> Self {
        Self::Client(id.into())
    }

    /// Returns the client id for client scopes.
    #[must_use]
    pub fn client_id(&self) -> Option<&str> {
        match self {
            Self::Realm => None,
            Self::Client(id) => Some(id),
        }
    }
}

impl fmt::Display for RoleScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Realm => f.write_str("realm"),
            Self::Client(id) => write!(f, "client:{id}"),
        }
    }
}
