//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::{NotificationPriority, NotificationStatus, NotificationType};

/// A guest-service or safety alert requiring staff attention.
///
/// Stored documents come in two shapes (guest requests and vision-system
/// alerts). The store adapter resolves them once into this canonical form
/// with an explicit [`NotificationKind`] discriminant and a single
/// `createdAt` timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Hex form of the store identifier.
    pub id: String,
    /// Event classification, when the producer supplied one.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub notification_type: Option<NotificationType>,
    /// Handling progress.
    pub status: NotificationStatus,
    /// Optional short title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Image URLs attached by the producer, in order.
    #[serde(default)]
    pub images: Vec<String>,
    /// Normalized creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Shape-specific attribution.
    #[serde(flatten)]
    pub kind: NotificationKind,
}

/// Discriminates the two notification producers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationKind {
    /// Raised by or on behalf of a guest.
    Guest(GuestAlert),
    /// Raised by the vision/ingestion system.
    System(SystemAlert),
}

/// Attribution of a guest-raised notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestAlert {
    /// Guest identifier.
    pub user_id: String,
    /// Guest display name.
    pub user_name: String,
    /// Room the guest occupies.
    #[serde(default)]
    pub room_number: String,
    /// Urgency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<NotificationPriority>,
}

/// Attribution of a system-raised notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemAlert {
    /// Tracker identifier of the detected person.
    pub track_id: String,
}

impl Notification {
    /// Return the guest attribution, if this is a guest notification.
    pub fn guest(&self) -> Option<&GuestAlert> {
        match &self.kind {
            NotificationKind::Guest(guest) => Some(guest),
            NotificationKind::System(_) => None,
        }
    }

    /// Return the system attribution, if this is a system notification.
    pub fn system(&self) -> Option<&SystemAlert> {
        match &self.kind {
            NotificationKind::System(system) => Some(system),
            NotificationKind::Guest(_) => None,
        }
    }

    /// Short label of the discriminant (`"guest"` or `"system"`).
    pub fn kind_label(&self) -> &'static str {
        match self.kind {
            NotificationKind::Guest(_) => "guest",
            NotificationKind::System(_) => "system",
        }
    }

    /// Priority, for guest notifications that carry one.
    pub fn priority(&self) -> Option<NotificationPriority> {
        self.guest().and_then(|g| g.priority)
    }
}
