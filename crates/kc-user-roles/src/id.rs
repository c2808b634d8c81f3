//! Resource identity.

use std::fmt;
use std::str::FromStr;

use crate::error::UserRolesError;

/// Identity of a user-roles resource: `{realm_id}/{user_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserRolesId {
    /// Realm ID.
    pub realm_id: String,
    /// User ID.
    pub user_id: String,
}

impl UserRolesId {
    /// Creates a new identity.
    #[must_use]
    pub fn new(realm_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            realm_id: realm_id.into(),
            user_id: user_id.into(),
        }
    }
}

impl fmt::Display for UserRolesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.realm_id, self.user_id)
    }
}

impl FromStr for UserRolesId {
    type Err = UserRolesError;

    /// Splits on `/`; anything other than exactly two segments is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();

        match parts.as_slice() {
            [realm_id, user_id] => Ok(Self::new(*realm_id, *user_id)),
            _ => Err(UserRolesError::InvalidImportId { id: s.to_string() }),
        }
    }
}
