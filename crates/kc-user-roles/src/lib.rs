//! # kc-user-roles
//!
//! Keeps the realm and client roles assigned to a Keycloak user equal to a
//! declared set of role ids.
//!
//! A reconciliation resolves the declared ids into roles grouped by scope,
//! fetches the roles currently assigned, diffs the two and issues the
//! add/remove calls needed to converge. [`UserRolesResource`] exposes this
//! as Create / Read / Update / Delete / Import lifecycle operations.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod diff;
pub mod error;
pub mod id;
pub mod mutator;
pub mod resolver;
pub mod resource;

#[cfg(test)]
mod testing;

pub use diff::{diff, RoleDiff};
pub use error::{UserRolesError, UserRolesResult};
pub use id::UserRolesId;
pub use mutator::{apply_roles, Mutation};
pub use resolver::{fetch_assigned_roles, resolve_roles};
pub use resource::{ReconcileReport, UserRolesResource, UserRolesState};
