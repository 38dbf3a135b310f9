//! Identity provider errors.

use thiserror::Error;

use staywatch_core::error::{AppError, ErrorKind};

/// Errors raised while talking to an identity provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider refused the request (bad credentials, duplicate email, ...).
    #[error("{message}")]
    Rejected {
        /// Provider error code, e.g. `EMAIL_EXISTS`.
        code: String,
        /// Readable message suitable for end users.
        message: String,
    },
    /// The provider could not be reached. The request URL is stripped
    /// since it carries the API key.
    #[error("Identity provider request failed: {0}")]
    Transport(#[source] reqwest::Error),
    /// The provider answered with something we cannot interpret.
    #[error("Unexpected identity provider response: {0}")]
    InvalidResponse(String),
    /// Local failure (hashing, poisoned state).
    #[error("Identity provider internal error: {0}")]
    Internal(String),
}

impl ProviderError {
    /// Build a rejection from a raw provider code, with the readable message.
    pub fn rejected(raw: impl AsRef<str>) -> Self {
        let raw = raw.as_ref();
        let code = raw.split_once(" : ").map_or(raw, |(code, _)| code);
        Self::Rejected {
            code: code.trim().to_string(),
            message: describe_code(raw),
        }
    }

    /// Provider code of a rejection.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Rejected { code, .. } => Some(code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url())
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Rejected { message, .. } => AppError::authentication(message),
            other => {
                let message = other.to_string();
                AppError::with_source(ErrorKind::ExternalService, message, other)
            }
        }
    }
}

/// Readable text for identity-toolkit error codes.
///
/// Codes may carry a detail suffix (`"WEAK_PASSWORD : Password should be at
/// least 6 characters"`); the detail wins when present.
pub fn describe_code(raw: &str) -> String {
    let (code, detail) = match raw.split_once(" : ") {
        Some((code, detail)) => (code.trim(), Some(detail.trim())),
        None => (raw.trim(), None),
    };

    if let Some(detail) = detail.filter(|d| !d.is_empty()) {
        return detail.to_string();
    }

    match code {
        "EMAIL_EXISTS" => "The email address is already in use by another account.",
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            "The email or password is incorrect."
        }
        "INVALID_EMAIL" => "The email address is badly formatted.",
        "MISSING_PASSWORD" => "A password is required.",
        "WEAK_PASSWORD" => "Password should be at least 6 characters.",
        "USER_DISABLED" => "This account has been disabled.",
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "Too many attempts. Try again later.",
        "INVALID_ID_TOKEN" | "TOKEN_EXPIRED" | "USER_NOT_FOUND" => {
            "The session is no longer valid. Please sign in again."
        }
        "OPERATION_NOT_ALLOWED" => "Email/password sign-in is disabled for this project.",
        other => return format!("Authentication failed ({other})."),
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_known_code() {
        assert_eq!(
            describe_code("EMAIL_EXISTS"),
            "The email address is already in use by another account."
        );
    }

    #[test]
    fn test_describe_prefers_detail() {
        assert_eq!(
            describe_code("WEAK_PASSWORD : Password should be at least 6 characters"),
            "Password should be at least 6 characters"
        );
    }

    #[test]
    fn test_describe_unknown_code() {
        assert_eq!(describe_code("QUOTA_EXCEEDED"), "Authentication failed (QUOTA_EXCEEDED).");
    }

    #[test]
    fn test_rejected_strips_detail_from_code() {
        let err = ProviderError::rejected("WEAK_PASSWORD : Password should be at least 6 characters");
        assert_eq!(err.code(), Some("WEAK_PASSWORD"));
    }

    #[test]
    fn test_rejection_maps_to_authentication() {
        let app: AppError = ProviderError::rejected("EMAIL_EXISTS").into();
        assert_eq!(app.kind, ErrorKind::Authentication);
        assert!(app.message.contains("already in use"));
    }
}
