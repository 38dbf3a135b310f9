//! Argon2id hashing for locally held accounts.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use crate::error::ProviderError;

/// Hashes and checks passwords for the in-memory identity backend.
///
/// Plaintext never leaves this type; callers keep only the PHC string.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Hasher with the Argon2id defaults.
    pub fn new() -> Self {
        Self
    }

    /// Produce a salted PHC hash string.
    pub fn hash(&self, password: &str) -> Result<String, ProviderError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| ProviderError::Internal(format!("password hashing failed: {e}")))
    }

    /// Check `password` against a stored PHC string.
    ///
    /// A mismatch is `Ok(false)`; only a corrupt hash is an error.
    pub fn verify(&self, password: &str, stored: &str) -> Result<bool, ProviderError> {
        let parsed = PasswordHash::new(stored)
            .map_err(|e| ProviderError::Internal(format!("stored hash is unreadable: {e}")))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(ProviderError::Internal(format!(
                "password verification failed: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hasher = PasswordHasher::new();
        let stored = hasher.hash("night-shift-42").unwrap();
        assert!(stored.starts_with("$argon2id$"));
        assert!(hasher.verify("night-shift-42", &stored).unwrap());
        assert!(!hasher.verify("day-shift-42", &stored).unwrap());
    }

    #[test]
    fn test_salts_differ() {
        let hasher = PasswordHasher::new();
        assert_ne!(hasher.hash("same").unwrap(), hasher.hash("same").unwrap());
    }

    #[test]
    fn test_corrupt_hash_is_error() {
        assert!(PasswordHasher::new().verify("pw", "not-a-phc-string").is_err());
    }
}
