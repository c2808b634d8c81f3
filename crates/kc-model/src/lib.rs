//! # kc-model
//!
//! Role and role-mapping models for Keycloak Rust administration.
//!
//! These types follow the Keycloak Admin REST API wire format and add a
//! scope-keyed [`RoleMapping`] used to compare declared and assigned roles.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod mapping;
pub mod role;
pub mod user;

pub use mapping::{ClientMappings, RoleMapping, UserRoleMappings};
pub use role::{Role, RoleScope};
pub use user::User;
