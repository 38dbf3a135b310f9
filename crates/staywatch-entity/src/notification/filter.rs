//! Validated notification filter set.

use serde::{Deserialize, Serialize};

use super::category::{NotificationPriority, NotificationStatus, NotificationType};

/// Conjunction of optional predicates restricting a notification query.
///
/// Absent fields impose no constraint; an empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationFilter {
    /// Exact guest identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Exact notification type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub notification_type: Option<NotificationType>,
    /// Exact priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<NotificationPriority>,
    /// Exact status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<NotificationStatus>,
}

impl NotificationFilter {
    /// Whether no predicate is set.
    pub fn is_empty(&self) -> bool {
        self.user_id.is_none()
            && self.notification_type.is_none()
            && self.priority.is_none()
            && self.status.is_none()
    }

    /// Present predicates as `(store field, value)` pairs.
    pub fn predicates(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        if let Some(user_id) = &self.user_id {
            out.push(("userId", user_id.clone()));
        }
        if let Some(t) = self.notification_type {
            out.push(("type", t.as_str().to_string()));
        }
        if let Some(p) = self.priority {
            out.push(("priority", p.as_str().to_string()));
        }
        if let Some(s) = self.status {
            out.push(("status", s.as_str().to_string()));
        }
        out
    }
}
