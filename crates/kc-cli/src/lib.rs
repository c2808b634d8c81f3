//! # kc-cli
//!
//! Command-line tool for Keycloak user role mappings.
//!
//! This crate provides:
//! - `kc user-roles create|read|update|delete|import` over a JSON state file
//! - `kc config show|set|init` for `~/.keycloak/kc.toml`

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::Cli;
pub use config::CliConfig;
pub use error::{CliError, CliResult};
