//! Admin API provider trait.

use std::sync::Arc;

use async_trait::async_trait;
use kc_model::{Role, User, UserRoleMappings};

use crate::error::AdminResult;

/// Operations on a user's role mappings.
///
/// Every call is a single remote round-trip; implementations do not cache.
#[async_trait]
pub trait KeycloakAdmin: Send + Sync {
    /// Gets a user by ID.
    ///
    /// ## Errors
    ///
    /// Returns `AdminError::NotFound` if the user doesn't exist.
    async fn get_user(&self, realm_id: &str, user_id: &str) -> AdminResult<User>;

    /// Gets the roles directly assigned to a user.
    async fn get_user_role_mappings(
        &self,
        realm_id: &str,
        user_id: &str,
    ) -> AdminResult<UserRoleMappings>;

    /// Gets a role (realm or client) by ID.
    ///
    /// ## Errors
    ///
    /// Returns `AdminError::NotFound` if no role with that ID exists in the realm.
    async fn get_role_by_id(&self, realm_id: &str, role_id: &str) -> AdminResult<Role>;

    /// Grants realm roles to a user.
    async fn add_realm_roles_to_user(
        &self,
        realm_id: &str,
        user_id: &str,
        roles: &[Role],
    ) -> AdminResult<()>;

    /// Revokes realm roles from a user.
    async fn remove_realm_roles_from_user(
        &self,
        realm_id: &str,
        user_id: &str,
        roles: &[Role],
    ) -> AdminResult<()>;

    /// Grants roles of one client to a user.
    async fn add_client_roles_to_user(
        &self,
        realm_id: &str,
        user_id: &str,
        client_id: &str,
        roles: &[Role],
    ) -> AdminResult<()>;

    /// Revokes roles of one client from a user.
    async fn remove_client_roles_from_user(
        &self,
        realm_id: &str,
        user_id: &str,
        client_id: &str,
        roles: &[Role],
    ) -> AdminResult<()>;
}

#[async_trait]
impl<T: KeycloakAdmin + ?Sized> KeycloakAdmin for Arc<T> {
    async fn get_user(&self, realm_id: &str, user_id: &str) -> AdminResult<User> {
        (**self).get_user(realm_id, user_id).await
    }

    async fn get_user_role_mappings(
        &self,
        realm_id: &str,
        user_id: &str,
    ) -> AdminResult<UserRoleMappings> {
        (**self).get_user_role_mappings(realm_id, user_id).await
    }

    async fn get_role_by_id(&self, realm_id: &str, role_id: &str) -> AdminResult<Role> {
        (**self).get_role_by_id(realm_id, role_id).await
    }

    async fn add_realm_roles_to_user(
        &self,
        realm_id: &str,
        user_id: &str,
        roles: &[Role],
    ) -> AdminResult<()> {
        (**self).add_realm_roles_to_user(realm_id, user_id, roles).await
    }

    async fn remove_realm_roles_from_user(
        &self,
        realm_id: &str,
        user_id: &str,
        roles: &[Role],
    ) -> AdminResult<()> {
        (**self)
            .remove_realm_roles_from_user(realm_id, user_id, roles)
            .await
    }

    async fn add_client_roles_to_user(
        &self,
        realm_id: &str,
        user_id: &str,
        client_id: &str,
        roles: &[Role],
    ) -> AdminResult<()> {
        (**self)
            .add_client_roles_to_user(realm_id, user_id, client_id, roles)
            .await
    }

    async fn remove_client_roles_from_user(
        &self,
        realm_id: &str,
        user_id: &str,
        client_id: &str,
        roles: &[Role],
    ) -> AdminResult<()> {
        (**self)
            .remove_client_roles_from_user(realm_id, user_id, client_id, roles)
            .await
    }
}
