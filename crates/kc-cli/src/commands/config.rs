//! Configuration management commands.

use crate::cli::ConfigCommand;
use crate::config::{AuthConfig, OutputFormat};
use crate::output::{info, success};
use crate::CliConfig;

/// Runs a config command.
pub fn run_config(cmd: ConfigCommand, config: &mut CliConfig) -> crate::CliResult<()> {
    match cmd {
        ConfigCommand::Show => show_config(config),
        ConfigCommand::Set { key, value } => {
            set_value(config, &key, &value)?;
            config.save()?;
            success(&format!("Set {key} = {}", display_value(&key, &value)));
            Ok(())
        }
        ConfigCommand::Init => init_config(config),
    }
}

/// Shows the current configuration.
fn show_config(config: &CliConfig) -> crate::CliResult<()> {
    let config_path = CliConfig::config_path()?;

    info(&format!("Configuration file: {}", config_path.display()));
    println!();
    println!("server_url: {}", config.server_url);

    if let Some(realm) = &config.default_realm {
        println!("default_realm: {realm}");
    }

    println!("output_format: {:?}", config.output_format);
    println!("timeout_secs: {}", config.timeout_secs);

    match &config.auth {
        Some(auth) => {
            println!("auth.realm: {}", auth.realm);
            println!("auth.client_id: {}", auth.client_id);
            if let Some(username) = &auth.username {
                println!("auth.username: {username}");
            }
            if auth.client_secret.is_some() {
                println!("auth.client_secret: ****");
            }
        }
        None => println!("auth: not configured"),
    }

    Ok(())
}

/// Applies one `key = value` assignment to the configuration.
pub fn set_value(config: &mut CliConfig, key: &str, value: &str) -> crate::CliResult<()> {
    match key {
        "server_url" | "server" => {
            config.server_url = value.to_string();
        }
        "default_realm" | "realm" => {
            config.default_realm = optional(value);
        }
        "output_format" | "output" => {
            config.output_format = parse_output_format(value)?;
        }
        "timeout_secs" | "timeout" => {
            config.timeout_secs = value.parse().map_err(|_| {
                crate::CliError::InvalidArgument(format!("Invalid timeout: {value}"))
            })?;
        }
        "auth.realm" => auth_mut(config).realm = value.to_string(),
        "auth.client_id" => auth_mut(config).client_id = value.to_string(),
        "auth.client_secret" => auth_mut(config).client_secret = optional(value),
        "auth.username" => auth_mut(config).username = optional(value),
        _ => {
            return Err(crate::CliError::InvalidArgument(format!(
                "Unknown configuration key: {key}. Known keys: server_url, default_realm, \
                 output_format, timeout_secs, auth.realm, auth.client_id, auth.client_secret, \
                 auth.username"
            )));
        }
    }
    Ok(())
}

fn auth_mut(config: &mut CliConfig) -> &mut AuthConfig {
    config
        .auth
        .get_or_insert_with(|| AuthConfig::new("admin-cli"))
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() || value == "none" {
        None
    } else {
        Some(value.to_string())
    }
}

fn display_value<'a>(key: &str, value: &'a str) -> &'a str {
    if key == "auth.client_secret" {
        "****"
    } else {
        value
    }
}

fn parse_output_format(value: &str) -> crate::CliResult<OutputFormat> {
    match value.to_lowercase().as_str() {
        "table" => Ok(OutputFormat::Table),
        "json" => Ok(OutputFormat::Json),
        "yaml" => Ok(OutputFormat::Yaml),
        "quiet" => Ok(OutputFormat::Quiet),
        _ => Err(crate::CliError::InvalidArgument(format!(
            "Unknown output format: {value}. Supported: table, json, yaml, quiet"
        ))),
    }
}

fn prompt(label: &str, current: &str) -> crate::CliResult<Option<String>> {
    print!("{label} [{current}]: ");
    std::io::Write::flush(&mut std::io::stdout())?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    let trimmed = input.trim();
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

/// Initializes configuration interactively.
fn init_config(config: &mut CliConfig) -> crate::CliResult<()> {
    let config_path = CliConfig::config_path()?;

    info("Initializing Keycloak CLI configuration...");
    println!();

    if let Some(url) = prompt("Server URL", &config.server_url)? {
        config.server_url = url;
    }

    let current = config.default_realm.clone().unwrap_or_else(|| "(none)".to_string());
    if let Some(realm) = prompt("Default realm", &current)? {
        config.default_realm = optional(&realm);
    }

    let current = format!("{:?}", config.output_format).to_lowercase();
    if let Some(format) = prompt("Output format (table/json/yaml/quiet)", &current)? {
        config.output_format = parse_output_format(&format).unwrap_or(config.output_format);
    }

    let auth = auth_mut(config);
    if let Some(client_id) = prompt("Auth client ID", &auth.client_id)? {
        auth.client_id = client_id;
    }
    let current = auth.username.clone().unwrap_or_else(|| "(none)".to_string());
    if let Some(username) = prompt("Auth username (none for client credentials)", &current)? {
        auth.username = optional(&username);
    }

    config.save()?;

    println!();
    success(&format!("Configuration saved to: {}", config_path.display()));
    Ok(())
}
