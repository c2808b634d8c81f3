//! End-to-End Integration Tests
//!
//! These tests drive the user role lifecycle through the HTTP admin client
//! against a mocked Keycloak Admin API.

mod common;
mod user_roles;
