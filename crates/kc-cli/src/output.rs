//! Output formatting utilities.

use colored::Colorize;
use kc_user_roles::{ReconcileReport, UserRolesState};
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::config::OutputFormat;

/// Prints a success message.
pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Prints an error message.
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Prints a warning message.
pub fn warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message);
}

/// Prints an info message.
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// One declared or assigned role id, for table output.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct RoleIdRow {
    /// Role ID.
    #[tabled(rename = "Role ID")]
    pub role_id: String,
}

/// Outputs rows in the specified format.
pub fn output<T: Tabled + Serialize>(data: &[T], format: OutputFormat) -> crate::CliResult<()> {
    match format {
        OutputFormat::Table if data.is_empty() => info("No results found."),
        OutputFormat::Table => {
            let table = Table::new(data).with(Style::rounded()).to_string();
            println!("{table}");
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(data)?),
        OutputFormat::Yaml => {
            for item in data {
                print_yaml_value(&serde_json::to_value(item)?, 0);
            }
        }
        OutputFormat::Quiet => {}
    }
    Ok(())
}

/// Outputs a single item.
pub fn output_single<T: Serialize>(item: &T, format: OutputFormat) -> crate::CliResult<()> {
    match format {
        OutputFormat::Table | OutputFormat::Yaml => {
            print_yaml_value(&serde_json::to_value(item)?, 0);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(item)?),
        OutputFormat::Quiet => {}
    }
    Ok(())
}

/// Outputs a resource state: its identity, then the role ids.
pub fn output_state(state: &UserRolesState, format: OutputFormat) -> crate::CliResult<()> {
    match format {
        OutputFormat::Table => {
            if let Some(id) = &state.id {
                info(&format!("{} ({} roles)", id, state.role_ids.len()));
            }
            let rows: Vec<RoleIdRow> = state
                .role_ids
                .iter()
                .map(|id| RoleIdRow { role_id: id.clone() })
                .collect();
            output(&rows, format)
        }
        OutputFormat::Quiet => {
            for id in &state.role_ids {
                println!("{id}");
            }
            Ok(())
        }
        OutputFormat::Json | OutputFormat::Yaml => output_single(state, format),
    }
}

/// Describes a reconciliation outcome in one line.
#[must_use]
pub fn describe_report(report: &ReconcileReport) -> String {
    if report.is_noop() {
        "Roles already up to date".to_string()
    } else {
        format!(
            "Granted {} role(s), revoked {} role(s)",
            report.added, report.removed
        )
    }
}

/// Prints a JSON value as YAML-like output.
fn print_yaml_value(value: &serde_json::Value, indent: usize) {
    let prefix = "  ".repeat(indent);

    match value {
        serde_json::Value::Array(items) => {
            for item in items {
                if item.is_object() || item.is_array() {
                    println!("{prefix}-");
                    print_yaml_value(item, indent + 1);
                } else {
                    println!("{prefix}- {}", scalar(item));
                }
            }
        }
        serde_json::Value::Object(map) => {
            for (key, val) in map {
                if val.is_object() || val.is_array() {
                    println!("{prefix}{key}:");
                    print_yaml_value(val, indent + 1);
                } else {
                    println!("{prefix}{key}: {}", scalar(val));
                }
            }
        }
        other => println!("{prefix}{}", scalar(other)),
    }
}

fn scalar(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Prompts for confirmation.
pub fn confirm(message: &str) -> crate::CliResult<bool> {
    print!("{message} [y/N]: ");
    std::io::Write::flush(&mut std::io::stdout())?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;

    let answer = input.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

/// Prompts for password input (hidden).
pub fn prompt_password(prompt: &str) -> crate::CliResult<String> {
    Ok(rpassword::prompt_password(prompt)?)
}
