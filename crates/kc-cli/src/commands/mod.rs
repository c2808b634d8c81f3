//! Command implementations.

pub mod config;
pub mod user_roles;

pub use config::run_config;
pub use user_roles::run_user_roles;

use std::time::Duration;

use kc_admin_client::{AdminClient, AdminClientConfig, Credentials};

use crate::config::AuthConfig;
use crate::output::prompt_password;
use crate::CliConfig;

/// Connection overrides taken from global flags and environment.
#[derive(Debug, Default, Clone)]
pub struct ConnectionArgs {
    /// Server URL override.
    pub server: Option<String>,
    /// Access token override.
    pub token: Option<String>,
    /// Client secret override.
    pub client_secret: Option<String>,
    /// Password override.
    pub password: Option<String>,
}

/// Connects to the Admin API using the configured credentials.
pub async fn connect(config: &CliConfig, args: &ConnectionArgs) -> crate::CliResult<AdminClient> {
    let base_url = args
        .server
        .clone()
        .unwrap_or_else(|| config.server_url.clone());
    let credentials = credentials(config.auth.as_ref(), args)?;

    tracing::debug!(server = %base_url, ?credentials, "connecting");
    let client_config = AdminClientConfig::new(base_url, credentials)
        .with_timeout(Duration::from_secs(config.timeout_secs));

    Ok(AdminClient::connect(&client_config).await?)
}

/// Picks the credentials to use: an explicit token first, then the
/// password grant when a username is configured, then client credentials.
fn credentials(auth: Option<&AuthConfig>, args: &ConnectionArgs) -> crate::CliResult<Credentials> {
    if let Some(token) = args
        .token
        .clone()
        .or_else(|| auth.and_then(|a| a.access_token.clone()))
    {
        return Ok(Credentials::Token(token));
    }

    let auth = auth.ok_or_else(|| {
        crate::CliError::Auth(
            "no credentials: set an access token or configure [auth] in kc.toml".to_string(),
        )
    })?;
    let client_secret = args
        .client_secret
        .clone()
        .or_else(|| auth.client_secret.clone());

    if let Some(username) = &auth.username {
        let password = match &args.password {
            Some(p) => p.clone(),
            None => prompt_password(&format!("Password for {username}: "))?,
        };
        return Ok(Credentials::Password {
            realm: auth.realm.clone(),
            client_id: auth.client_id.clone(),
            client_secret,
            username: username.clone(),
            password,
        });
    }

    let client_secret = client_secret.ok_or_else(|| {
        crate::CliError::Auth(format!(
            "client '{}' needs a client secret or a username",
            auth.client_id
        ))
    })?;

    Ok(Credentials::ClientCredentials {
        realm: auth.realm.clone(),
        client_id: auth.client_id.clone(),
        client_secret,
    })
}
