//! MongoDB-backed notification repository.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Document, doc};
use tracing::debug;

use staywatch_entity::notification::{Notification, NotificationFilter, NotificationStatus};

use crate::connection::DatabaseHandle;
use crate::document::{filter_document, normalize_all, sort_document, sort_newest_first};
use crate::error::StoreError;
use crate::store::{NotificationStore, UpdateOutcome};

/// Repository over the notifications collection.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    handle: DatabaseHandle,
    collection: Collection<Document>,
}

impl NotificationRepository {
    /// Create a repository bound to the handle's notifications collection.
    pub fn new(handle: &DatabaseHandle) -> Self {
        Self {
            handle: handle.clone(),
            collection: handle.notifications_collection(),
        }
    }
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn find(&self, filter: &NotificationFilter) -> Result<Vec<Notification>, StoreError> {
        let query = filter_document(filter);
        debug!(query = %query, "Querying notifications");

        let documents: Vec<Document> = self
            .collection
            .find(query)
            .sort(sort_document())
            .await?
            .try_collect()
            .await?;

        let mut notifications = normalize_all(&documents);
        sort_newest_first(&mut notifications);
        Ok(notifications)
    }

    async fn set_status(
        &self,
        id: ObjectId,
        status: NotificationStatus,
    ) -> Result<UpdateOutcome, StoreError> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "status": status.as_str() } },
            )
            .await?;

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.handle.health_check().await
    }
}
