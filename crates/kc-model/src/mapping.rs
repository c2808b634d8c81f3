//! Role mappings.
//!
//! [`UserRoleMappings`] is the wire shape of
//! `GET /admin/realms/{realm}/users/{id}/role-mappings`. [`RoleMapping`] is
//! the scope-keyed form used for comparing declared and assigned roles.

use std::collections::btree_map::{self, BTreeMap};
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::role::{Role, RoleScope};

/// Roles assigned to a user, as reported by the Admin REST API.
///
/// Keycloak omits both fields when they would be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRoleMappings {
    /// Realm roles.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub realm_mappings: Vec<Role>,
    /// Client roles keyed by the client's public `clientId`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub client_mappings: BTreeMap<String, ClientMappings>,
}

/// Roles of one client assigned to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMappings {
    /// Internal client id.
    pub id: String,
    /// Public client id (`clientId`).
    #[serde(default)]
    pub client: String,
    /// Assigned roles.
    #[serde(default)]
    pub mappings: Vec<Role>,
}

impl UserRoleMappings {
    /// Returns the ids of every assigned role, realm and client alike.
    #[must_use]
    pub fn role_ids(&self) -> BTreeSet<String> {
        self.realm_mappings
            .iter()
            .chain(self.client_mappings.values().flat_map(|c| c.mappings.iter()))
            .map(|role| role.id.clone())
            .collect()
    }
}

/// Roles grouped by the scope that owns them.
///
/// Iteration visits the realm scope first, then clients by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleMapping {
    scopes: BTreeMap<RoleScope, Vec<Role>>,
}

impl RoleMapping {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a role to its owning scope, creating the scope if needed.
    pub fn push(&mut self, role: Role) {
        self.scopes.entry(role.scope()).or_default().push(role);
    }

    /// Replaces the role list of a scope.
    pub fn insert(&mut self, scope: RoleScope, roles: Vec<Role>) {
        self.scopes.insert(scope, roles);
    }

    /// Gets the roles of a scope.
    #[must_use]
    pub fn get(&self, scope: &RoleScope) -> Option<&[Role]> {
        self.scopes.get(scope).map(Vec::as_slice)
    }

    /// Gets the realm roles.
    #[must_use]
    pub fn realm_roles(&self) -> Option<&[Role]> {
        self.get(&RoleScope::Realm)
    }

    /// Checks if a scope is present (even with an empty list).
    #[must_use]
    pub fn contains_scope(&self, scope: &RoleScope) -> bool {
        self.scopes.contains_key(scope)
    }

    /// Iterates over scopes and their roles.
    pub fn iter(&self) -> btree_map::Iter<'_, RoleScope, Vec<Role>> {
        self.scopes.iter()
    }

    /// Iterates over client scopes only, as `(client_id, roles)`.
    pub fn clients(&self) -> impl Iterator<Item = (&str, &[Role])> {
        self.scopes
            .iter()
            .filter_map(|(scope, roles)| scope.client_id().map(|id| (id, roles.as_slice())))
    }

    /// Number of scopes present.
    #[must_use]
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// Total number of roles over all scopes.
    #[must_use]
    pub fn role_count(&self) -> usize {
        self.scopes.values().map(Vec::len).sum()
    }

    /// Checks if no scope holds any role.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.values().all(Vec::is_empty)
    }

    /// Returns the ids of all roles over all scopes.
    #[must_use]
    pub fn role_ids(&self) -> BTreeSet<String> {
        self.scopes
            .values()
            .flatten()
            .map(|role| role.id.clone())
            .collect()
    }
}

impl FromIterator<Role> for RoleMapping {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for role in iter {
            mapping.push(role);
        }
        mapping
    }
}

impl From<&UserRoleMappings> for RoleMapping {
    /// Keys realm roles under [`RoleScope::Realm`] (omitted when there are
    /// none) and each client's roles under its internal id.
    fn from(mappings: &UserRoleMappings) -> Self {
        let mut mapping = Self::new();

        if !mappings.realm_mappings.is_empty() {
            mapping.insert(RoleScope::Realm, mappings.realm_mappings.clone());
        }

        for client in mappings.client_mappings.values() {
            mapping.insert(RoleScope::client(&client.id), client.mappings.clone());
        }

        mapping
    }
}

impl<'a> IntoIterator for &'a RoleMapping {
    type Item = (&'a RoleScope, &'a Vec<Role>);
    type IntoIter = btree_map::Iter<'a, RoleScope, Vec<Role>>;

    fn into_iter(self) -> Self::IntoIter {
        self.scopes.iter()
    }
}
