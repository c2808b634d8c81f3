//! # Keycloak CLI
//!
//! Command-line tool for Keycloak user role mappings.

#![forbid(unsafe_code)]

use clap::Parser;
use kc_cli::{
    cli::{Cli, Command},
    commands::{run_config, run_user_roles, ConnectionArgs},
    config::CliConfig,
    output::error,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let mut config = match CliConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error(&format!("Failed to load configuration: {e}"));
            std::process::exit(1);
        }
    };

    let output_format = cli.output.unwrap_or(config.output_format);
    let connection = ConnectionArgs {
        server: cli.server,
        token: cli.token,
        client_secret: cli.client_secret,
        password: cli.password,
    };

    // Execute command
    let result = match cli.command {
        Command::UserRoles(cmd) => {
            run_user_roles(
                cmd,
                &config,
                &connection,
                cli.realm.as_deref(),
                output_format,
            )
            .await
        }
        Command::Config(cmd) => run_config(cmd, &mut config),
    };

    if let Err(e) = result {
        error(&e.to_string());
        std::process::exit(1);
    }
}
