//! Admin client error types.

use thiserror::Error;

/// Errors returned by the Keycloak Admin API.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Resource not found.
    #[error("{resource_type} not found: {id}")]
    NotFound {
        /// Type of resource (e.g., "User", "Role").
        resource_type: &'static str,
        /// Resource identifier.
        id: String,
    },

    /// The server answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },

    /// Token acquisition failed.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Invalid client configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl AdminError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// Checks if this is a not found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns the HTTP status reported by the server, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Auth(_) | Self::Config(_) => None,
        }
    }
}

/// Result type for admin operations.
pub type AdminResult<T> = Result<T, AdminError>;
