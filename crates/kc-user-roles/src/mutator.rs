//! Applies a role mapping to a user.

use std::fmt;

use kc_admin_client::KeycloakAdmin;
use kc_model::{RoleMapping, User};

use crate::error::UserRolesResult;

/// Whether roles are granted or revoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// Grant the roles.
    Add,
    /// Revoke the roles.
    Remove,
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => f.write_str("add"),
            Self::Remove => f.write_str("remove"),
        }
    }
}

/// Grants or revokes every role of `mapping` for `user`.
///
/// Realm roles go in one call, then one call per client in mapping order.
/// Empty scopes are skipped. The first failing call aborts the rest; calls
/// that already succeeded are not rolled back.
///
/// Returns the number of API calls issued.
pub async fn apply_roles<C>(
    admin: &C,
    user: &User,
    mapping: &RoleMapping,
    mutation: Mutation,
) -> UserRolesResult<usize>
where
    C: KeycloakAdmin + ?Sized,
{
    let mut calls = 0;

    if let Some(roles) = mapping.realm_roles().filter(|roles| !roles.is_empty()) {
        tracing::debug!(%mutation, user_id = %user.id, count = roles.len(), "realm roles");
        match mutation {
            Mutation::Add => {
                admin
                    .add_realm_roles_to_user(&user.realm_id, &user.id, roles)
                    .await?;
            }
            Mutation::Remove => {
                admin
                    .remove_realm_roles_from_user(&user.realm_id, &user.id, roles)
                    .await?;
            }
        }
        calls += 1;
    }

    for (client_id, roles) in mapping.clients() {
        if roles.is_empty() {
            continue;
        }
        tracing::debug!(%mutation, user_id = %user.id, client_id, count = roles.len(), "client roles");
        match mutation {
            Mutation::Add => {
                admin
                    .add_client_roles_to_user(&user.realm_id, &user.id, client_id, roles)
                    .await?;
            }
            Mutation::Remove => {
                admin
                    .remove_client_roles_from_user(&user.realm_id, &user.id, client_id, roles)
                    .await?;
            }
        }
        calls += 1;
    }

    Ok(calls)
}
