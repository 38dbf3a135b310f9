//! Process-local notification store.
//!
//! Holds raw documents so that the same normalization, filtering and
//! ordering rules apply as with MongoDB. Used by the `memory` provider for
//! local development and by tests.

use std::path::Path;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document};
use tokio::sync::RwLock;
use tracing::info;

use staywatch_entity::notification::{Notification, NotificationFilter, NotificationStatus};

use crate::document::{filter_document, matches, normalize_all, sort_newest_first};
use crate::error::StoreError;
use crate::store::{NotificationStore, UpdateOutcome};

/// In-memory notification store.
#[derive(Debug, Default)]
pub struct MemoryNotificationStore {
    documents: RwLock<Vec<Document>>,
}

impl MemoryNotificationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given documents.
    ///
    /// Documents without an `_id` get a fresh `ObjectId`.
    pub fn with_documents(documents: impl IntoIterator<Item = Document>) -> Self {
        let documents = documents.into_iter().map(with_object_id).collect();
        Self {
            documents: RwLock::new(documents),
        }
    }

    /// Load documents from a JSON file holding an array of objects.
    ///
    /// MongoDB extended JSON (`{"$oid": ...}`, `{"$date": ...}`) is honored.
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| StoreError::SeedIo {
                path: path.display().to_string(),
                source,
            })?;
        let store = Self::from_json_str(&raw)?;
        info!(
            path = %path.display(),
            count = store.documents.read().await.len(),
            "Seeded in-memory notification store"
        );
        Ok(store)
    }

    /// Parse documents from a JSON array string.
    pub fn from_json_str(raw: &str) -> Result<Self, StoreError> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| StoreError::InvalidSeed(e.to_string()))?;
        let serde_json::Value::Array(items) = value else {
            return Err(StoreError::InvalidSeed(
                "expected a JSON array of documents".to_string(),
            ));
        };

        let documents = items
            .into_iter()
            .map(|item| match Bson::try_from(item) {
                Ok(Bson::Document(document)) => Ok(document),
                Ok(other) => Err(StoreError::InvalidSeed(format!(
                    "expected an object, found {:?}",
                    other.element_type()
                ))),
                Err(e) => Err(StoreError::InvalidSeed(e.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::with_documents(documents))
    }

    /// Add a document, returning its `_id`.
    pub async fn insert(&self, document: Document) -> ObjectId {
        let document = with_object_id(document);
        let id = document.get_object_id("_id").unwrap_or_else(|_| ObjectId::new());
        self.documents.write().await.push(document);
        id
    }

    /// Snapshot of the raw document with the given `_id`.
    pub async fn raw(&self, id: ObjectId) -> Option<Document> {
        self.documents
            .read()
            .await
            .iter()
            .find(|d| d.get("_id") == Some(&Bson::ObjectId(id)))
            .cloned()
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Whether the store holds no documents.
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn find(&self, filter: &NotificationFilter) -> Result<Vec<Notification>, StoreError> {
        let query = filter_document(filter);
        let selected: Vec<Document> = self
            .documents
            .read()
            .await
            .iter()
            .filter(|document| matches(document, &query))
            .cloned()
            .collect();

        let mut notifications = normalize_all(&selected);
        sort_newest_first(&mut notifications);
        Ok(notifications)
    }

    async fn set_status(
        &self,
        id: ObjectId,
        status: NotificationStatus,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut documents = self.documents.write().await;
        let Some(document) = documents
            .iter_mut()
            .find(|d| d.get("_id") == Some(&Bson::ObjectId(id)))
        else {
            return Ok(UpdateOutcome::default());
        };

        let modified = document.get_str("status").ok() != Some(status.as_str());
        document.insert("status", status.as_str());

        Ok(UpdateOutcome {
            matched: 1,
            modified: u64::from(modified),
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

fn with_object_id(mut document: Document) -> Document {
    if !document.contains_key("_id") {
        document.insert("_id", ObjectId::new());
    }
    document
}
