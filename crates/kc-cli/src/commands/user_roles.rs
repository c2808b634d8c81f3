//! User role mapping commands.

use std::path::Path;

use kc_admin_client::KeycloakAdmin;
use kc_user_roles::{UserRolesId, UserRolesResource, UserRolesState};

use crate::cli::{UserRolesArgs, UserRolesCommand};
use crate::config::OutputFormat;
use crate::output::{confirm, describe_report, error, info, output_state, success, warning};
use crate::CliConfig;

use super::{connect, ConnectionArgs};

/// Runs a user-roles command.
pub async fn run_user_roles(
    cmd: UserRolesCommand,
    config: &CliConfig,
    connection: &ConnectionArgs,
    realm_arg: Option<&str>,
    output_format: OutputFormat,
) -> crate::CliResult<()> {
    match cmd {
        UserRolesCommand::Import { id, state } => {
            // Parse before connecting so a malformed id fails without a token request.
            UserRolesState::from_import_id(&id)?;
            let resource = UserRolesResource::new(connect(config, connection).await?);
            import(&resource, &id, state.as_deref(), output_format).await
        }
        UserRolesCommand::Create(args) => {
            let mut state = load_state(config, &args, realm_arg)?;
            let resource = UserRolesResource::new(connect(config, connection).await?);
            create(&resource, &mut state, args.state.as_deref(), output_format).await
        }
        UserRolesCommand::Read(args) => {
            let mut state = load_state(config, &args, realm_arg)?;
            let resource = UserRolesResource::new(connect(config, connection).await?);
            read(&resource, &mut state, args.state.as_deref(), output_format).await
        }
        UserRolesCommand::Update(args) => {
            let mut state = load_state(config, &args, realm_arg)?;
            let resource = UserRolesResource::new(connect(config, connection).await?);
            update(&resource, &mut state, args.state.as_deref(), output_format).await
        }
        UserRolesCommand::Delete { args, force } => {
            let state = load_state(config, &args, realm_arg)?;
            if !force {
                let msg = format!(
                    "Are you sure you want to revoke {} role(s) from user '{}'?",
                    state.role_ids.len(),
                    state.user_id
                );
                if !confirm(&msg)? {
                    error("Operation cancelled");
                    return Ok(());
                }
            }
            let resource = UserRolesResource::new(connect(config, connection).await?);
            delete(&resource, &state, args.state.as_deref()).await
        }
    }
}

/// Builds the resource state from the state file (if any) and the flags.
///
/// `--realm`/`--user` override the file; the global realm only fills a
/// missing realm. `--role-id` replaces the declared set. Once the file
/// carries an identity, its realm and user can no longer change.
pub fn load_state(
    config: &CliConfig,
    args: &UserRolesArgs,
    realm_arg: Option<&str>,
) -> crate::CliResult<UserRolesState> {
    let mut state = match &args.state {
        Some(path) if path.exists() => read_state_file(path)?,
        _ => UserRolesState::default(),
    };

    if let Some(realm) = &args.realm {
        state.realm_id = realm.clone();
    } else if state.realm_id.is_empty() {
        state.realm_id = config.effective_realm(realm_arg).unwrap_or_default();
    }
    if let Some(user) = &args.user {
        state.user_id = user.clone();
    }
    if !args.role_ids.is_empty() {
        state.role_ids = args.role_ids.iter().cloned().collect();
    }

    if state.realm_id.is_empty() {
        return Err(crate::CliError::InvalidArgument("realm is required".to_string()));
    }
    if state.user_id.is_empty() {
        return Err(crate::CliError::InvalidArgument("user is required".to_string()));
    }
    if let Some(id) = &state.id {
        let id: UserRolesId = id.parse()?;
        if id.realm_id != state.realm_id || id.user_id != state.user_id {
            return Err(crate::CliError::InvalidArgument(format!(
                "state file belongs to {id}; realm and user cannot change to {}/{}",
                state.realm_id, state.user_id
            )));
        }
    }
    Ok(state)
}

/// Reads a JSON state file.
pub fn read_state_file(path: &Path) -> crate::CliResult<UserRolesState> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Writes a JSON state file.
pub fn write_state_file(path: &Path, state: &UserRolesState) -> crate::CliResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(state)?)?;
    Ok(())
}

fn save(path: Option<&Path>, state: &UserRolesState) -> crate::CliResult<()> {
    if let Some(path) = path {
        write_state_file(path, state)?;
        info(&format!("State written to '{}'", path.display()));
    }
    Ok(())
}

async fn create<C: KeycloakAdmin>(
    resource: &UserRolesResource<C>,
    state: &mut UserRolesState,
    path: Option<&Path>,
    format: OutputFormat,
) -> crate::CliResult<()> {
    let report = resource.create(state).await?;
    success(&describe_report(&report));
    save(path, state)?;
    output_state(state, format)
}

async fn read<C: KeycloakAdmin>(
    resource: &UserRolesResource<C>,
    state: &mut UserRolesState,
    path: Option<&Path>,
    format: OutputFormat,
) -> crate::CliResult<()> {
    resource.read(state).await?;
    save(path, state)?;
    output_state(state, format)
}

async fn update<C: KeycloakAdmin>(
    resource: &UserRolesResource<C>,
    state: &mut UserRolesState,
    path: Option<&Path>,
    format: OutputFormat,
) -> crate::CliResult<()> {
    if state.id.is_none() {
        warning("Resource has no identity yet; updating as if it had been created");
    }
    let report = resource.update(state).await?;
    success(&describe_report(&report));
    save(path, state)?;
    output_state(state, format)
}

async fn delete<C: KeycloakAdmin>(
    resource: &UserRolesResource<C>,
    state: &UserRolesState,
    path: Option<&Path>,
) -> crate::CliResult<()> {
    resource.delete(state).await?;
    success(&format!(
        "Revoked {} role(s) from user '{}'",
        state.role_ids.len(),
        state.user_id
    ));

    if let Some(path) = path.filter(|p| p.exists()) {
        std::fs::remove_file(path)?;
        info(&format!("State file '{}' removed", path.display()));
    }
    Ok(())
}

async fn import<C: KeycloakAdmin>(
    resource: &UserRolesResource<C>,
    id: &str,
    path: Option<&Path>,
    format: OutputFormat,
) -> crate::CliResult<()> {
    let mut state = resource.import(id)?;
    resource.read(&mut state).await?;
    success(&format!(
        "Imported {} with {} role(s)",
        state.resource_id(),
        state.role_ids.len()
    ));
    save(path, &state)?;
    output_state(&state, format)
}
