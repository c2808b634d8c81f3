//! HTTP implementation of [`KeycloakAdmin`] over the Admin REST API.

use std::time::Duration;

use async_trait::async_trait;
use kc_model::{Role, User, UserRoleMappings};
use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::auth::Credentials;
use crate::error::{AdminError, AdminResult};
use crate::provider::KeycloakAdmin;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`AdminClient`].
#[derive(Debug, Clone)]
pub struct AdminClientConfig {
    /// Server URL (e.g., http://localhost:8080).
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// How to obtain the bearer token.
    pub credentials: Credentials,
}

impl AdminClientConfig {
    /// Creates a config with the default timeout.
    #[must_use]
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            credentials,
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Keycloak Admin REST API client.
#[derive(Clone)]
pub struct AdminClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl AdminClient {
    /// Builds the HTTP client and obtains an access token.
    pub async fn connect(config: &AdminClientConfig) -> AdminResult<Self> {
        let base_url = normalize_base_url(&config.base_url)?;
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        let token = config.credentials.access_token(&http, &base_url).await?;

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    /// Creates a client from an existing token without contacting the server.
    pub fn with_token(base_url: &str, token: impl Into<String>) -> AdminResult<Self> {
        let http = reqwest::Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
            token: token.into(),
        })
    }

    /// Gets the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn user_path(&self, realm_id: &str, user_id: &str) -> String {
        format!(
            "{}/admin/realms/{}/users/{}",
            self.base_url,
            urlencoding::encode(realm_id),
            urlencoding::encode(user_id)
        )
    }

    fn realm_mapping_path(&self, realm_id: &str, user_id: &str) -> String {
        format!("{}/role-mappings/realm", self.user_path(realm_id, user_id))
    }

    fn client_mapping_path(&self, realm_id: &str, user_id: &str, client_id: &str) -> String {
        format!(
            "{}/role-mappings/clients/{}",
            self.user_path(realm_id, user_id),
            urlencoding::encode(client_id)
        )
    }

    /// Makes a GET request, mapping 404 to `NotFound`.
    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        resource_type: &'static str,
        id: &str,
    ) -> AdminResult<T> {
        tracing::debug!(method = "GET", url = %url, "admin request");
        let response = self.http.get(url).bearer_auth(&self.token).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AdminError::not_found(resource_type, id));
        }
        handle_response(response).await
    }

    /// Sends a role list as the JSON body of a POST or DELETE.
    async fn send_roles(&self, method: Method, url: &str, roles: &[Role]) -> AdminResult<()> {
        tracing::debug!(method = %method, url = %url, count = roles.len(), "admin request");
        let response = self
            .http
            .request(method, url)
            .bearer_auth(&self.token)
            .json(roles)
            .send()
            .await?;
        handle_empty_response(response).await
    }
}

#[async_trait]
impl KeycloakAdmin for AdminClient {
    async fn get_user(&self, realm_id: &str, user_id: &str) -> AdminResult<User> {
        let user: User = self
            .get(&self.user_path(realm_id, user_id), "User", user_id)
            .await?;
        Ok(user.in_realm(realm_id))
    }

    async fn get_user_role_mappings(
        &self,
        realm_id: &str,
        user_id: &str,
    ) -> AdminResult<UserRoleMappings> {
        let url = format!("{}/role-mappings", self.user_path(realm_id, user_id));
        self.get(&url, "User", user_id).await
    }

    async fn get_role_by_id(&self, realm_id: &str, role_id: &str) -> AdminResult<Role> {
        let url = format!(
            "{}/admin/realms/{}/roles-by-id/{}",
            self.base_url,
            urlencoding::encode(realm_id),
            urlencoding::encode(role_id)
        );
        self.get(&url, "Role", role_id).await
    }

    async fn add_realm_roles_to_user(
        &self,
        realm_id: &str,
        user_id: &str,
        roles: &[Role],
    ) -> AdminResult<()> {
        let url = self.realm_mapping_path(realm_id, user_id);
        self.send_roles(Method::POST, &url, roles).await
    }

    async fn remove_realm_roles_from_user(
        &self,
        realm_id: &str,
        user_id: &str,
        roles: &[Role],
    ) -> AdminResult<()> {
        let url = self.realm_mapping_path(realm_id, user_id);
        self.send_roles(Method::DELETE, &url, roles).await
    }

    async fn add_client_roles_to_user(
        &self,
        realm_id: &str,
        user_id: &str,
        client_id: &str,
        roles: &[Role],
    ) -> AdminResult<()> {
        let url = self.client_mapping_path(realm_id, user_id, client_id);
        self.send_roles(Method::POST, &url, roles).await
    }

    async fn remove_client_roles_from_user(
        &self,
        realm_id: &str,
        user_id: &str,
        client_id: &str,
        roles: &[Role],
    ) -> AdminResult<()> {
        let url = self.client_mapping_path(realm_id, user_id, client_id);
        self.send_roles(Method::DELETE, &url, roles).await
    }
}

fn normalize_base_url(base_url: &str) -> AdminResult<String> {
    let trimmed = base_url.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(AdminError::Config(format!(
            "server URL must start with http:// or https://: {base_url}"
        )));
    }
    Ok(trimmed.to_string())
}

/// Handles a response with a body.
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> AdminResult<T> {
    let status = response.status();

    if status.is_success() {
        response.json().await.map_err(AdminError::Http)
    } else {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(AdminError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Handles a response without a body.
async fn handle_empty_response(response: reqwest::Response) -> AdminResult<()> {
    let status = response.status();

    if status.is_success() {
        Ok(())
    } else {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(AdminError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
