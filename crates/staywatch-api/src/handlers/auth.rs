//! Sign-in and sign-up handlers.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use staywatch_auth::{AuthFlow, AuthSuccess};
use staywatch_entity::user::{Credentials, Registration};

use crate::dto::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

fn flow(state: &AppState) -> AuthFlow {
    AuthFlow::new(
        state.identity.clone(),
        state.config.auth.redirect_path.clone(),
    )
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<ApiResponse<AuthSuccess>>, ApiError> {
    let Json(credentials) =
        payload.map_err(|e| ApiError::from_json_rejection(e, "Invalid request data"))?;

    let success = flow(&state).sign_in(&credentials).await?;
    Ok(Json(ApiResponse::ok(success)))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<Registration>, JsonRejection>,
) -> Result<Json<ApiResponse<AuthSuccess>>, ApiError> {
    let Json(registration) =
        payload.map_err(|e| ApiError::from_json_rejection(e, "Invalid registration data"))?;

    let success = flow(&state).sign_up(&registration).await?;
    Ok(Json(ApiResponse::ok(success)))
}
