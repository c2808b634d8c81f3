//! Reconciler error types.

use kc_admin_client::AdminError;
use thiserror::Error;

/// Errors that can occur while reconciling user role mappings.
#[derive(Debug, Error)]
pub enum UserRolesError {
    /// A lookup or mutation against the Admin API failed.
    #[error(transparent)]
    Admin(#[from] AdminError),

    /// The import identity does not have the `{realm}/{userId}` shape.
    #[error("invalid import. Supported import format: {{realm}}/{{userId}}")]
    InvalidImportId {
        /// The rejected identity string.
        id: String,
    },

    /// A required field of the resource state is empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The stored identity names a different realm or user than the state.
    #[error("identity {id} does not match {realm_id}/{user_id}: realm and user cannot change")]
    IdentityMismatch {
        /// The stored identity.
        id: String,
        /// Realm of the state.
        realm_id: String,
        /// User of the state.
        user_id: String,
    },

    /// A resolved client role carries no owning client id.
    #[error("client role {role_id} has no owning client")]
    UnownedClientRole {
        /// The role that was resolved.
        role_id: String,
    },
}

impl UserRolesError {
    /// Checks if the underlying admin error is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Admin(e) if e.is_not_found())
    }
}

/// Result type for reconciler operations.
pub type UserRolesResult<T> = Result<T, UserRolesError>;
