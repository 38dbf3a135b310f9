//! Identity provider abstraction and backends.

pub mod firebase;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use staywatch_core::config::AuthConfig;
use staywatch_core::error::AppError;
use staywatch_core::result::AppResult;
use staywatch_entity::user::{Credentials, Identity, IdentitySession, Registration};

use crate::error::ProviderError;

pub use firebase::FirebaseIdentityProvider;
pub use memory::MemoryIdentityProvider;

/// An external authority for email/password accounts.
#[async_trait]
pub trait IdentityProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Authenticate an existing account.
    async fn sign_in(&self, credentials: &Credentials) -> Result<IdentitySession, ProviderError>;

    /// Create an account and sign it in.
    async fn sign_up(&self, registration: &Registration) -> Result<IdentitySession, ProviderError>;

    /// Resolve a bearer token to the account it was issued for.
    async fn verify(&self, id_token: &str) -> Result<Identity, ProviderError>;
}

/// Construct the provider selected by `auth.provider`.
pub fn build_identity_provider(config: &AuthConfig) -> AppResult<Arc<dyn IdentityProvider>> {
    match config.provider.as_str() {
        "firebase" => {
            info!(base_url = %config.base_url, "Using identity-toolkit provider");
            Ok(Arc::new(FirebaseIdentityProvider::new(config)?))
        }
        "memory" => {
            info!("Using in-memory identity provider");
            Ok(Arc::new(MemoryIdentityProvider::new()))
        }
        other => Err(AppError::configuration(format!(
            "Unknown auth provider: '{other}'. Supported: firebase, memory"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_memory() {
        let provider = build_identity_provider(&AuthConfig::default()).unwrap();
        assert_eq!(provider.name(), "memory");
    }

    #[test]
    fn test_build_firebase_requires_key() {
        let config = AuthConfig {
            provider: "firebase".to_string(),
            ..Default::default()
        };
        assert!(build_identity_provider(&config).is_err());

        let config = AuthConfig {
            api_key: "AIza-test".to_string(),
            ..config
        };
        assert_eq!(build_identity_provider(&config).unwrap().name(), "firebase");
    }

    #[test]
    fn test_build_unknown() {
        let config = AuthConfig {
            provider: "ldap".to_string(),
            ..Default::default()
        };
        let err = build_identity_provider(&config).unwrap_err();
        assert!(err.message.contains("ldap"));
    }
}
