//! Response DTOs.

use serde::{Deserialize, Serialize};

use staywatch_entity::notification::Notification;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Success flag with a message, as returned by the status update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Always `true`.
    pub success: bool,
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Successful response with a message.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// A notification on the wire.
///
/// Existing dashboards read the store key `_id`; it is emitted alongside
/// the canonical `id`.
#[derive(Debug, Serialize)]
pub struct NotificationBody<'a> {
    /// Store identifier.
    #[serde(rename = "_id")]
    pub store_id: &'a str,
    /// The notification itself.
    #[serde(flatten)]
    pub notification: &'a Notification,
}

impl<'a> From<&'a Notification> for NotificationBody<'a> {
    fn from(notification: &'a Notification) -> Self {
        Self {
            store_id: &notification.id,
            notification,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}
