//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::OutputFormat;

/// Keycloak CLI - manages the roles assigned to Keycloak users.
#[derive(Debug, Parser)]
#[command(name = "kc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Server URL (overrides config).
    #[arg(short, long, env = "KC_SERVER_URL")]
    pub server: Option<String>,

    /// Default realm (overrides config).
    #[arg(short, long, env = "KC_REALM")]
    pub realm: Option<String>,

    /// Output format (overrides config).
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Access token (skips the token request).
    #[arg(long, env = "KC_ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Client secret for the configured auth client.
    #[arg(long, env = "KC_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Password for the configured auth user (will prompt if needed and not provided).
    #[arg(long, env = "KC_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// User role mapping commands.
    #[command(subcommand)]
    UserRoles(UserRolesCommand),

    /// Configuration management.
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// User role mapping commands.
#[derive(Debug, Subcommand)]
pub enum UserRolesCommand {
    /// Grant the declared roles and revoke every other role of the user.
    Create(UserRolesArgs),

    /// Show the roles currently assigned to the user.
    Read(UserRolesArgs),

    /// Converge an existing resource onto a new set of roles.
    Update(UserRolesArgs),

    /// Revoke every declared role from the user.
    Delete {
        /// Resource arguments.
        #[command(flatten)]
        args: UserRolesArgs,

        /// Skip confirmation.
        #[arg(long)]
        force: bool,
    },

    /// Import an existing user's roles by `{realm}/{userId}`.
    Import {
        /// Identity of the form `{realm}/{userId}`.
        id: String,

        /// State file to write.
        #[arg(long)]
        state: Option<PathBuf>,
    },
}

/// Arguments identifying a user-roles resource.
#[derive(Debug, Clone, Default, Args)]
pub struct UserRolesArgs {
    /// User ID.
    #[arg(long)]
    pub user: Option<String>,

    /// Realm name.
    #[arg(long)]
    pub realm: Option<String>,

    /// Role ID to declare (repeatable; replaces the roles in the state file).
    #[arg(long = "role-id", value_name = "ID")]
    pub role_ids: Vec<String>,

    /// JSON state file to read from and write to.
    #[arg(long)]
    pub state: Option<PathBuf>,
}

/// Config commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,

    /// Set a configuration value.
    Set {
        /// Configuration key.
        key: String,
        /// Configuration value.
        value: String,
    },

    /// Initialize configuration interactively.
    Init,
}
