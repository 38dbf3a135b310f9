//! Status transition command.

use serde::{Deserialize, Serialize};

use super::category::NotificationStatus;

/// Move one notification to a new workflow status.
///
/// Any status may follow any other; only the `status` field is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    /// Hex identifier of the notification.
    pub id: String,
    /// Target status.
    pub status: NotificationStatus,
}
