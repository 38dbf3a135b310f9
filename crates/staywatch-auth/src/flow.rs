//! Sign-in / sign-up state machine.
//!
//! ```text
//! Anonymous --sign_in--> Authenticating --ok--> Authenticated
//! Anonymous --sign_up--> Registering    --ok--> Authenticated
//!                         (either)      --err-> Anonymous { error }
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};
use validator::{ValidationError, ValidationErrors, ValidateEmail};

use staywatch_core::error::AppError;
use staywatch_core::result::AppResult;
use staywatch_entity::user::{Credentials, Identity, IdentitySession, Registration};

use crate::error::ProviderError;
use crate::provider::IdentityProvider;

/// Shown for every failed sign-in, whatever the provider said.
pub const SIGN_IN_FAILED_MESSAGE: &str = "Failed to log in. Please check your email and password.";

/// Where a client is in the authentication flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// Not signed in; carries the message of the last failure.
    Anonymous {
        /// User-facing error from the previous attempt.
        error: Option<String>,
    },
    /// Waiting on the provider for a sign-in.
    Authenticating,
    /// Waiting on the provider for a sign-up.
    Registering,
    /// Signed in.
    Authenticated {
        /// The account.
        identity: Identity,
        /// Route the client should open next.
        redirect_to: String,
    },
}

/// Result of a successful sign-in or sign-up, as returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSuccess {
    /// Bearer token for the notification API.
    pub id_token: String,
    /// Provider refresh token.
    pub refresh_token: String,
    /// Token lifetime in seconds.
    pub expires_in: u64,
    /// Provider account id.
    pub user_id: String,
    /// Account email.
    pub email: String,
    /// Display name typed on sign-up, or the provider's.
    pub display_name: Option<String>,
    /// Route to open after authenticating.
    pub redirect_to: String,
}

/// Drives one client through sign-in or sign-up.
#[derive(Debug, Clone)]
pub struct AuthFlow {
    provider: Arc<dyn IdentityProvider>,
    redirect_path: String,
    state: AuthState,
}

impl AuthFlow {
    /// Start anonymous.
    pub fn new(provider: Arc<dyn IdentityProvider>, redirect_path: impl Into<String>) -> Self {
        Self {
            provider,
            redirect_path: redirect_path.into(),
            state: AuthState::Anonymous { error: None },
        }
    }

    /// Current state.
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Whether a session is established.
    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, AuthState::Authenticated { .. })
    }

    /// Drop the session.
    pub fn sign_out(&mut self) {
        self.state = AuthState::Anonymous { error: None };
    }

    /// Authenticate with email and password.
    ///
    /// Every rejection surfaces as [`SIGN_IN_FAILED_MESSAGE`]; the provider's
    /// reason only reaches the log.
    pub async fn sign_in(&mut self, credentials: &Credentials) -> AppResult<AuthSuccess> {
        self.state = AuthState::Authenticating;

        if credentials.email.trim().is_empty() || credentials.password.is_empty() {
            return Err(self.fail(AppError::authentication(SIGN_IN_FAILED_MESSAGE)));
        }

        match self.provider.sign_in(credentials).await {
            Ok(session) => Ok(self.succeed(session, None)),
            Err(e) => {
                match &e {
                    ProviderError::Rejected { code, .. } => {
                        warn!(provider = self.provider.name(), code = %code, "Sign-in rejected");
                    }
                    other => {
                        error!(provider = self.provider.name(), error = %other, "Sign-in failed");
                    }
                }
                Err(self.fail(AppError::authentication(SIGN_IN_FAILED_MESSAGE)))
            }
        }
    }

    /// Create an account and sign it in.
    ///
    /// Malformed input is a validation error; provider rejections pass
    /// their message through unchanged.
    pub async fn sign_up(&mut self, registration: &Registration) -> AppResult<AuthSuccess> {
        self.state = AuthState::Registering;

        if let Err(errors) = validate_registration(registration) {
            let err = AppError::validation("Invalid registration data")
                .with_details(serde_json::to_value(&errors).unwrap_or_default());
            return Err(self.fail(err));
        }

        match self.provider.sign_up(registration).await {
            Ok(session) => {
                let display_name = registration
                    .display_name
                    .as_deref()
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string);
                Ok(self.succeed(session, display_name))
            }
            Err(e) => {
                warn!(provider = self.provider.name(), error = %e, "Sign-up rejected");
                Err(self.fail(e.into()))
            }
        }
    }

    fn succeed(&mut self, session: IdentitySession, display_name: Option<String>) -> AuthSuccess {
        let identity = session.identity;
        info!(user_id = %identity.user_id, redirect_to = %self.redirect_path, "Authenticated");

        let success = AuthSuccess {
            id_token: session.id_token,
            refresh_token: session.refresh_token,
            expires_in: session.expires_in,
            user_id: identity.user_id.clone(),
            email: identity.email.clone(),
            display_name: display_name.or_else(|| identity.display_name.clone()),
            redirect_to: self.redirect_path.clone(),
        };
        self.state = AuthState::Authenticated {
            identity,
            redirect_to: self.redirect_path.clone(),
        };
        success
    }

    fn fail(&mut self, err: AppError) -> AppError {
        self.state = AuthState::Anonymous {
            error: Some(err.message.clone()),
        };
        err
    }
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Check the sign-up form before it reaches the provider.
pub fn validate_registration(registration: &Registration) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if !registration.email.trim().validate_email() {
        errors.add("email", field_error("email", "Enter a valid email address"));
    }
    if registration.password.is_empty() {
        errors.add("password", field_error("required", "Password is required"));
    }
    if let Some(confirm) = &registration.confirm_password {
        if confirm != &registration.password {
            errors.add(
                "confirmPassword",
                field_error("mismatch", "Passwords do not match"),
            );
        }
    }

    if errors.errors().is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
