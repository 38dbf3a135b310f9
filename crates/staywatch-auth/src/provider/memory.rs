//! In-process identity backend for development and tests.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use staywatch_entity::user::{Credentials, Identity, IdentitySession, Registration};

use super::IdentityProvider;
use crate::error::ProviderError;
use crate::password::PasswordHasher;

/// Shortest password accepted on sign-up.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Lifetime of issued tokens.
const TOKEN_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone)]
struct Account {
    identity: Identity,
    password_hash: String,
}

#[derive(Debug, Clone)]
struct Session {
    account_key: String,
    expires_at: Instant,
}

/// Accounts and sessions held in memory; nothing survives a restart.
///
/// Mirrors the error codes of the identity-toolkit API so that callers see
/// the same rejections regardless of backend.
#[derive(Debug, Default)]
pub struct MemoryIdentityProvider {
    hasher: PasswordHasher,
    accounts: RwLock<HashMap<String, Account>>,
    sessions: RwLock<HashMap<String, Session>>,
}

impl MemoryIdentityProvider {
    /// Empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered accounts.
    pub async fn account_count(&self) -> usize {
        self.accounts.read().await.len()
    }

    /// Forget a token, as a sign-out would.
    pub async fn revoke(&self, id_token: &str) -> bool {
        self.sessions.write().await.remove(id_token).is_some()
    }

    async fn issue(&self, account_key: String, identity: Identity) -> IdentitySession {
        let id_token = format!("mem.{}", Uuid::new_v4().simple());
        self.sessions.write().await.insert(
            id_token.clone(),
            Session {
                account_key,
                expires_at: Instant::now() + TOKEN_TTL,
            },
        );

        IdentitySession {
            id_token,
            refresh_token: Uuid::new_v4().simple().to_string(),
            expires_in: TOKEN_TTL.as_secs(),
            identity,
        }
    }
}

fn account_key(email: &str) -> String {
    email.trim().to_lowercase()
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.ends_with('.'),
        None => false,
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<IdentitySession, ProviderError> {
        let key = account_key(&credentials.email);
        let account = self
            .accounts
            .read()
            .await
            .get(&key)
            .cloned()
            .ok_or_else(|| ProviderError::rejected("INVALID_LOGIN_CREDENTIALS"))?;

        if !self
            .hasher
            .verify(&credentials.password, &account.password_hash)?
        {
            return Err(ProviderError::rejected("INVALID_LOGIN_CREDENTIALS"));
        }

        debug!(user_id = %account.identity.user_id, "Memory sign-in");
        Ok(self.issue(key, account.identity).await)
    }

    async fn sign_up(&self, registration: &Registration) -> Result<IdentitySession, ProviderError> {
        let key = account_key(&registration.email);
        if !looks_like_email(&key) {
            return Err(ProviderError::rejected("INVALID_EMAIL"));
        }
        if registration.password.is_empty() {
            return Err(ProviderError::rejected("MISSING_PASSWORD"));
        }
        if registration.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ProviderError::rejected(
                "WEAK_PASSWORD : Password should be at least 6 characters",
            ));
        }

        let password_hash = self.hasher.hash(&registration.password)?;
        let identity = Identity {
            user_id: Uuid::new_v4().simple().to_string(),
            email: registration.email.trim().to_string(),
            display_name: None,
        };

        {
            let mut accounts = self.accounts.write().await;
            if accounts.contains_key(&key) {
                return Err(ProviderError::rejected("EMAIL_EXISTS"));
            }
            accounts.insert(
                key.clone(),
                Account {
                    identity: identity.clone(),
                    password_hash,
                },
            );
        }

        info!(user_id = %identity.user_id, "Registered in-memory account");
        Ok(self.issue(key, identity).await)
    }

    async fn verify(&self, id_token: &str) -> Result<Identity, ProviderError> {
        let session = self
            .sessions
            .read()
            .await
            .get(id_token)
            .cloned()
            .ok_or_else(|| ProviderError::rejected("INVALID_ID_TOKEN"))?;

        if session.expires_at <= Instant::now() {
            self.sessions.write().await.remove(id_token);
            return Err(ProviderError::rejected("TOKEN_EXPIRED"));
        }

        self.accounts
            .read()
            .await
            .get(&session.account_key)
            .map(|account| account.identity.clone())
            .ok_or_else(|| ProviderError::rejected("USER_NOT_FOUND"))
    }
}
