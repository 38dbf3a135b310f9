//! Identity provider configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Authentication configuration.
///
/// Credentials are never checked locally: sign-in, sign-up and token
/// verification are delegated to the configured identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Provider backend: `"firebase"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Web API key of the identity-toolkit project.
    #[serde(default)]
    pub api_key: String,
    /// Base URL of the identity-toolkit REST API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Route the client is sent to after a successful sign-in or sign-up.
    #[serde(default = "default_redirect_path")]
    pub redirect_path: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_key: String::new(),
            base_url: default_base_url(),
            redirect_path: default_redirect_path(),
        }
    }
}

impl AuthConfig {
    /// Fail fast when the selected provider cannot be constructed.
    pub fn validate(&self) -> Result<(), AppError> {
        match self.provider.as_str() {
            "firebase" if self.api_key.trim().is_empty() => Err(AppError::configuration(
                "Missing identity provider API key: set auth.api_key",
            )),
            "firebase" | "memory" => Ok(()),
            other => Err(AppError::configuration(format!(
                "Unknown auth provider: '{other}'. Supported: firebase, memory"
            ))),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_base_url() -> String {
    "https://identitytoolkit.googleapis.com/v1".to_string()
}

fn default_redirect_path() -> String {
    "/notifications/all".to_string()
}
