//! `AuthUser` extractor: verifies the bearer token with the identity provider.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use tracing::{debug, warn};

use staywatch_auth::ProviderError;
use staywatch_core::error::{AppError, ErrorKind};
use staywatch_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|e| {
                    debug!(reason = %e, "Missing or malformed Authorization header");
                    AppError::authentication("Authentication required")
                })?;

        let identity = state
            .identity
            .verify(bearer.token())
            .await
            .map_err(|e| match e {
                ProviderError::Rejected { code, .. } => {
                    debug!(code = %code, "Bearer token rejected");
                    AppError::authentication("Invalid or expired token")
                }
                other => {
                    warn!(error = %other, "Token verification unavailable");
                    AppError::with_source(
                        ErrorKind::ServiceUnavailable,
                        "Identity provider unavailable",
                        other,
                    )
                }
            })?;

        Ok(AuthUser(RequestContext::new(&identity)))
    }
}
