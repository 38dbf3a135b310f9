//! Identity value objects exchanged with the external identity provider.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Email/password pair submitted on sign-in.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Account email.
    pub email: String,
    /// Plaintext password, forwarded to the provider only.
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"****")
            .finish()
    }
}

/// Sign-up form.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Account email.
    pub email: String,
    /// Plaintext password, forwarded to the provider only.
    pub password: String,
    /// Display name typed on the form.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Repeated password, when the form asks for one.
    #[serde(default)]
    pub confirm_password: Option<String>,
}

impl Registration {
    /// The email/password part of the form.
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("password", &"****")
            .field("display_name", &self.display_name)
            .field("confirm_password", &self.confirm_password.as_ref().map(|_| "****"))
            .finish()
    }
}

/// An account as known to the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Provider-assigned account id.
    pub user_id: String,
    /// Account email.
    pub email: String,
    /// Display name, when the provider knows one.
    #[serde(default)]
    pub display_name: Option<String>,
}

/// A successful sign-in or sign-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentitySession {
    /// Bearer token for subsequent API calls.
    pub id_token: String,
    /// Provider refresh token.
    #[serde(default)]
    pub refresh_token: String,
    /// Token lifetime in seconds.
    pub expires_in: u64,
    /// Who signed in.
    pub identity: Identity,
}
