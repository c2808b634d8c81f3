//! Role-set resolution.
//!
//! Declared roles are bare ids; the Admin API needs full role
//! representations grouped by the realm or client that owns them.

use std::collections::BTreeSet;

use kc_admin_client::KeycloakAdmin;
use kc_model::RoleMapping;

use crate::error::{UserRolesError, UserRolesResult};

/// Looks up each role id in the realm and groups the roles by scope.
///
/// ## Errors
///
/// Fails with the lookup error of the first id that cannot be resolved,
/// or with [`UserRolesError::UnownedClientRole`] for a client role whose
/// owning client is unknown.
pub async fn resolve_roles<C>(
    admin: &C,
    realm_id: &str,
    role_ids: &BTreeSet<String>,
) -> UserRolesResult<RoleMapping>
where
    C: KeycloakAdmin + ?Sized,
{
    let mut mapping = RoleMapping::new();

    for role_id in role_ids {
        let role = admin.get_role_by_id(realm_id, role_id).await?;
        if role.client_role && role.container_id.as_deref().map_or(true, str::is_empty) {
            return Err(UserRolesError::UnownedClientRole { role_id: role.id });
        }
        tracing::debug!(role_id = %role.id, role = %role.name, scope = %role.scope(), "resolved role");
        mapping.push(role);
    }

    Ok(mapping)
}

/// Fetches the roles currently assigned to a user, grouped by scope.
///
/// ## Errors
///
/// Fails with the Admin API error when the user or realm cannot be read.
pub async fn fetch_assigned_roles<C>(
    admin: &C,
    realm_id: &str,
    user_id: &str,
) -> UserRolesResult<RoleMapping>
where
    C: KeycloakAdmin + ?Sized,
{
    let mappings = admin.get_user_role_mappings(realm_id, user_id).await?;
    Ok(RoleMapping::from(&mappings))
}
