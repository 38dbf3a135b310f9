//! Notification handlers.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};

use staywatch_service::{NotificationQuery, StatusUpdateRequest};

use crate::dto::{MessageResponse, NotificationBody};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<NotificationQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) =
        query.map_err(|e| ApiError::from_query_rejection(e, "Invalid filter parameters"))?;

    let notifications = state.notification_service.list(&auth, query).await?;
    let body: Vec<NotificationBody<'_>> = notifications.iter().map(NotificationBody::from).collect();
    Ok(Json(body).into_response())
}

/// PUT /api/notifications
pub async fn update_notification(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<StatusUpdateRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) =
        payload.map_err(|e| ApiError::from_json_rejection(e, "Invalid request data"))?;

    state
        .notification_service
        .update_status(&auth, request)
        .await?;
    Ok(Json(MessageResponse::ok("Notification updated successfully")))
}
