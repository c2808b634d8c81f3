//! User-roles resource lifecycle.
//!
//! Create and Update converge the user's assigned roles onto the declared
//! set. Read overwrites the declared set with what the server reports.
//! Delete revokes every declared role. Nothing is cached between calls:
//! every operation starts from a fresh remote fetch.

use std::collections::BTreeSet;

use kc_admin_client::KeycloakAdmin;
use kc_model::User;
use serde::{Deserialize, Serialize};

use crate::diff::diff;
use crate::error::{UserRolesError, UserRolesResult};
use crate::id::UserRolesId;
use crate::mutator::{apply_roles, Mutation};
use crate::resolver::{fetch_assigned_roles, resolve_roles};

/// Stored state of a user-roles resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRolesState {
    /// Resource identity (`{realm_id}/{user_id}`), set once created or imported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Realm the user lives in.
    pub realm_id: String,
    /// User whose roles are managed.
    pub user_id: String,
    /// Declared role ids, realm and client roles alike.
    #[serde(default)]
    pub role_ids: BTreeSet<String>,
}

impl UserRolesState {
    /// Creates a state with no identity yet.
    #[must_use]
    pub fn new<I, S>(realm_id: impl Into<String>, user_id: impl Into<String>, role_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: None,
            realm_id: realm_id.into(),
            user_id: user_id.into(),
            role_ids: role_ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the identity derived from realm and user.
    #[must_use]
    pub fn resource_id(&self) -> UserRolesId {
        UserRolesId::new(&self.realm_id, &self.user_id)
    }

    /// Parses an identity of the form `{realm}/{userId}` into a state
    /// with no declared roles.
    pub fn from_import_id(id: &str) -> UserRolesResult<Self> {
        let id: UserRolesId = id.parse()?;

        Ok(Self {
            id: Some(id.to_string()),
            realm_id: id.realm_id,
            user_id: id.user_id,
            role_ids: BTreeSet::new(),
        })
    }

    fn validate(&self) -> UserRolesResult<()> {
        if self.realm_id.is_empty() {
            return Err(UserRolesError::MissingField("realm_id"));
        }
        if self.user_id.is_empty() {
            return Err(UserRolesError::MissingField("user_id"));
        }
        if let Some(id) = &self.id {
            if *id != self.resource_id().to_string() {
                return Err(UserRolesError::IdentityMismatch {
                    id: id.clone(),
                    realm_id: self.realm_id.clone(),
                    user_id: self.user_id.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Outcome of one reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Roles granted.
    pub added: usize,
    /// Roles revoked.
    pub removed: usize,
    /// Mutating API calls issued.
    pub calls: usize,
}

impl ReconcileReport {
    /// Checks if the user already matched the declaration.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.calls == 0
    }
}

/// Lifecycle operations for the roles of one user.
pub struct UserRolesResource<C> {
    admin: C,
}

impl<C: KeycloakAdmin> UserRolesResource<C> {
    /// Creates a resource backed by the given admin API.
    pub const fn new(admin: C) -> Self {
        Self { admin }
    }

    /// Gets the admin API.
    pub const fn admin(&self) -> &C {
        &self.admin
    }

    /// Converges the user's roles onto `state.role_ids`, sets the identity,
    /// then reads the assigned roles back into `state`.
    pub async fn create(&self, state: &mut UserRolesState) -> UserRolesResult<ReconcileReport> {
        state.validate()?;
        let report = self.reconcile(state).await?;

        state.id = Some(state.resource_id().to_string());
        self.read(state).await?;
        Ok(report)
    }

    /// Replaces `state.role_ids` with every role currently assigned to the user.
    pub async fn read(&self, state: &mut UserRolesState) -> UserRolesResult<()> {
        state.validate()?;
        let mappings = self
            .admin
            .get_user_role_mappings(&state.realm_id, &state.user_id)
            .await?;

        state.role_ids = mappings.role_ids();
        state.id = Some(state.resource_id().to_string());
        tracing::debug!(
            id = %state.resource_id(),
            count = state.role_ids.len(),
            "read user role mappings"
        );
        Ok(())
    }

    /// Same convergence as [`create`](Self::create).
    ///
    /// Realm and user are fixed once the identity is set: a state whose
    /// `id` no longer matches them is rejected before any call. Ends with
    /// a read so the stored role ids reflect the server.
    pub async fn update(&self, state: &mut UserRolesState) -> UserRolesResult<ReconcileReport> {
        state.validate()?;
        let report = self.reconcile(state).await?;

        self.read(state).await?;
        Ok(report)
    }

    /// Revokes every declared role from the user.
    ///
    /// No remote fetch or diff happens: each declared role is resolved and
    /// removed whether or not it is currently assigned.
    ///
    /// Returns the number of API calls issued.
    pub async fn delete(&self, state: &UserRolesState) -> UserRolesResult<usize> {
        state.validate()?;
        let user = self.user(state).await?;
        if state.role_ids.is_empty() {
            tracing::warn!(id = %state.resource_id(), "no declared roles to revoke");
        }

        let to_remove = resolve_roles(&self.admin, &state.realm_id, &state.role_ids).await?;
        let calls = apply_roles(&self.admin, &user, &to_remove, Mutation::Remove).await?;

        tracing::info!(
            id = %state.resource_id(),
            removed = to_remove.role_count(),
            "revoked declared roles"
        );
        Ok(calls)
    }

    /// Builds a state from an identity of the form `{realm}/{userId}`.
    ///
    /// The role ids stay empty until the next [`read`](Self::read).
    pub fn import(&self, id: &str) -> UserRolesResult<UserRolesState> {
        let state = UserRolesState::from_import_id(id)?;
        tracing::debug!(id = %state.resource_id(), "imported user roles");
        Ok(state)
    }

    async fn user(&self, state: &UserRolesState) -> UserRolesResult<User> {
        Ok(self
            .admin
            .get_user(&state.realm_id, &state.user_id)
            .await?
            .in_realm(&state.realm_id))
    }

    async fn reconcile(&self, state: &UserRolesState) -> UserRolesResult<ReconcileReport> {
        let user = self.user(state).await?;

        let desired = resolve_roles(&self.admin, &state.realm_id, &state.role_ids).await?;
        // Default roles granted by the realm usually make this non-empty on first run.
        let remote = fetch_assigned_roles(&self.admin, &state.realm_id, &state.user_id).await?;

        let diff = diff(&desired, &remote);

        let mut calls = apply_roles(&self.admin, &user, &diff.to_add, Mutation::Add).await?;
        calls += apply_roles(&self.admin, &user, &diff.to_remove, Mutation::Remove).await?;

        let report = ReconcileReport {
            added: diff.to_add.role_count(),
            removed: diff.to_remove.role_count(),
            calls,
        };
        tracing::info!(
            id = %state.resource_id(),
            added = report.added,
            removed = report.removed,
            "reconciled user role mappings"
        );
        Ok(report)
    }
}
