//! Identity-toolkit REST backend (Firebase Authentication).

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use staywatch_core::config::AuthConfig;
use staywatch_core::error::{AppError, ErrorKind};
use staywatch_entity::user::{Credentials, Identity, IdentitySession, Registration};

use super::IdentityProvider;
use crate::error::ProviderError;

/// Token lifetime assumed when the provider omits `expiresIn`.
const DEFAULT_EXPIRES_IN: u64 = 3600;

/// Talks to `accounts:*` endpoints of an identity-toolkit compatible API.
#[derive(Debug, Clone)]
pub struct FirebaseIdentityProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    id_token: String,
    #[serde(default)]
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<String>,
    local_id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl FirebaseIdentityProvider {
    /// Build a client for the configured project.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        if config.api_key.trim().is_empty() {
            return Err(AppError::configuration(
                "Missing identity provider API key: set auth.api_key",
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build identity provider client: {e}"),
                    e,
                )
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/accounts:{method}?key={}", self.base_url, self.api_key)
    }

    async fn call<B, R>(&self, method: &str, body: &B) -> Result<R, ProviderError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        debug!(method, "Calling identity provider");
        let response = self.http.post(self.endpoint(method)).json(body).send().await?;
        let status = response.status();

        if status.is_success() {
            return response
                .json::<R>()
                .await
                .map_err(|e| ProviderError::InvalidResponse(e.without_url().to_string()));
        }

        match response.json::<ErrorEnvelope>().await {
            Ok(envelope) => Err(ProviderError::rejected(envelope.error.message)),
            Err(_) => Err(ProviderError::InvalidResponse(format!(
                "{method} returned HTTP {status}"
            ))),
        }
    }

    async fn password_call(
        &self,
        method: &str,
        credentials: &Credentials,
    ) -> Result<IdentitySession, ProviderError> {
        let request = PasswordRequest {
            email: &credentials.email,
            password: &credentials.password,
            return_secure_token: true,
        };
        let token: TokenResponse = self.call(method, &request).await?;
        Ok(token.into_session())
    }
}

impl TokenResponse {
    fn into_session(self) -> IdentitySession {
        let expires_in = self
            .expires_in
            .as_deref()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_EXPIRES_IN);

        IdentitySession {
            id_token: self.id_token,
            refresh_token: self.refresh_token,
            expires_in,
            identity: Identity {
                user_id: self.local_id,
                email: self.email,
                display_name: self.display_name.filter(|name| !name.is_empty()),
            },
        }
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentityProvider {
    fn name(&self) -> &'static str {
        "firebase"
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<IdentitySession, ProviderError> {
        self.password_call("signInWithPassword", credentials).await
    }

    async fn sign_up(&self, registration: &Registration) -> Result<IdentitySession, ProviderError> {
        self.password_call("signUp", &registration.credentials())
            .await
    }

    async fn verify(&self, id_token: &str) -> Result<Identity, ProviderError> {
        let response: LookupResponse = self.call("lookup", &LookupRequest { id_token }).await?;
        let user = response
            .users
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::rejected("INVALID_ID_TOKEN"))?;

        Ok(Identity {
            user_id: user.local_id,
            email: user.email,
            display_name: user.display_name.filter(|name| !name.is_empty()),
        })
    }
}
