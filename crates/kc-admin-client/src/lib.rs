//! # kc-admin-client
//!
//! Keycloak Admin REST API access for user role mappings.
//!
//! - [`KeycloakAdmin`] - the operations the role reconciler depends on
//! - [`AdminClient`] - reqwest-based implementation over HTTP
//! - [`Credentials`] - bearer token or OpenID Connect grant used to authenticate

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod auth;
pub mod client;
pub mod error;
pub mod provider;

pub use auth::Credentials;
pub use client::{AdminClient, AdminClientConfig, DEFAULT_TIMEOUT};
pub use error::{AdminError, AdminResult};
pub use provider::KeycloakAdmin;
