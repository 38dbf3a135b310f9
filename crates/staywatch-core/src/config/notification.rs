//! Notification API configuration.

use serde::{Deserialize, Serialize};

/// Notification query settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// When set, a `userId` filter must match the authenticated identity.
    /// Off by default: staff read every guest's notifications.
    #[serde(default)]
    pub bind_user_filter: bool,
}
