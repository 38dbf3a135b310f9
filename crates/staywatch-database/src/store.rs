//! Notification store abstraction.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use staywatch_entity::notification::{Notification, NotificationFilter, NotificationStatus};

use crate::error::StoreError;

/// Result of a status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    /// Documents whose `_id` matched.
    pub matched: u64,
    /// Documents actually changed (0 when the status was already set).
    pub modified: u64,
}

/// Read and status-patch access to the notifications collection.
///
/// Implementations never insert or delete documents. Results of
/// [`NotificationStore::find`] are ordered newest first.
#[async_trait]
pub trait NotificationStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return every notification matching the conjunction of `filter`.
    async fn find(&self, filter: &NotificationFilter) -> Result<Vec<Notification>, StoreError>;

    /// Set the `status` field of the document with the given `_id`.
    async fn set_status(
        &self,
        id: ObjectId,
        status: NotificationStatus,
    ) -> Result<UpdateOutcome, StoreError>;

    /// Check the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
