//! Admin token acquisition.
//!
//! Tokens are obtained once from the realm's OpenID Connect token endpoint
//! and used as bearer credentials for the lifetime of the client.

use std::fmt;

use serde::Deserialize;

use crate::error::{AdminError, AdminResult};

/// Credentials used to authenticate against the Admin API.
#[derive(Clone)]
pub enum Credentials {
    /// A pre-issued access token.
    Token(String),
    /// `client_credentials` grant with a confidential client.
    ClientCredentials {
        /// Realm holding the client (usually `master`).
        realm: String,
        /// Client ID.
        client_id: String,
        /// Client secret.
        client_secret: String,
    },
    /// `password` grant on behalf of an admin user.
    Password {
        /// Realm holding the user (usually `master`).
        realm: String,
        /// Client ID (usually `admin-cli`).
        client_id: String,
        /// Client secret, for confidential clients.
        client_secret: Option<String>,
        /// Username.
        username: String,
        /// Password.
        password: String,
    },
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(_) => f.debug_tuple("Token").field(&"***").finish(),
            Self::ClientCredentials { realm, client_id, .. } => f
                .debug_struct("ClientCredentials")
                .field("realm", realm)
                .field("client_id", client_id)
                .finish_non_exhaustive(),
            Self::Password {
                realm,
                client_id,
                username,
                ..
            } => f
                .debug_struct("Password")
                .field("realm", realm)
                .field("client_id", client_id)
                .field("username", username)
                .finish_non_exhaustive(),
        }
    }
}

/// Token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl Credentials {
    /// Returns a bearer token, requesting one from the server if needed.
    pub async fn access_token(
        &self,
        http: &reqwest::Client,
        base_url: &str,
    ) -> AdminResult<String> {
        let (realm, form) = match self {
            Self::Token(token) => return Ok(token.clone()),
            Self::ClientCredentials {
                realm,
                client_id,
                client_secret,
            } => (
                realm,
                vec![
                    ("grant_type", "client_credentials"),
                    ("client_id", client_id.as_str()),
                    ("client_secret", client_secret.as_str()),
                ],
            ),
            Self::Password {
                realm,
                client_id,
                client_secret,
                username,
                password,
            } => {
                let mut form = vec![
                    ("grant_type", "password"),
                    ("client_id", client_id.as_str()),
                    ("username", username.as_str()),
                    ("password", password.as_str()),
                ];
                if let Some(secret) = client_secret {
                    form.push(("client_secret", secret.as_str()));
                }
                (realm, form)
            }
        };

        let url = format!(
            "{}/realms/{}/protocol/openid-connect/token",
            base_url,
            urlencoding::encode(realm)
        );
        tracing::debug!(realm = %realm, "requesting admin access token");

        let response = http.post(&url).form(&form).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AdminError::Auth(format!(
                "token request failed with status {}: {}",
                status.as_u16(),
                message
            )));
        }

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }
}
