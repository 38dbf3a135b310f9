//! Store manager that dispatches to the configured provider.

use std::sync::Arc;

use tracing::info;

use staywatch_core::config::DatabaseConfig;
use staywatch_core::error::AppError;
use staywatch_core::result::AppResult;

use crate::connection::DatabaseHandle;
use crate::repositories::{MemoryNotificationStore, NotificationRepository};
use crate::store::NotificationStore;

/// Owns the notification store selected by configuration and, for MongoDB,
/// the connection handle whose lifetime it bounds.
#[derive(Debug, Clone)]
pub struct StoreManager {
    /// The active store.
    store: Arc<dyn NotificationStore>,
    /// The MongoDB handle, when the `mongodb` provider is active.
    handle: Option<DatabaseHandle>,
}

impl StoreManager {
    /// Create the store from configuration.
    pub async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider.as_str() {
            "mongodb" => {
                info!("Initializing MongoDB notification store");
                let handle = DatabaseHandle::connect(config).await?;
                let store = Arc::new(NotificationRepository::new(&handle));
                Ok(Self {
                    store,
                    handle: Some(handle),
                })
            }
            "memory" => {
                info!("Initializing in-memory notification store");
                let store = match &config.seed_file {
                    Some(path) => MemoryNotificationStore::from_json_file(path).await?,
                    None => MemoryNotificationStore::new(),
                };
                Ok(Self::from_store(Arc::new(store)))
            }
            other => Err(AppError::configuration(format!(
                "Unknown database provider: '{other}'. Supported: mongodb, memory"
            ))),
        }
    }

    /// Wrap an existing store (for testing).
    pub fn from_store(store: Arc<dyn NotificationStore>) -> Self {
        Self {
            store,
            handle: None,
        }
    }

    /// Shared reference to the active store.
    pub fn store(&self) -> Arc<dyn NotificationStore> {
        Arc::clone(&self.store)
    }

    /// Release the connection, if any.
    pub async fn shutdown(self) {
        if let Some(handle) = self.handle {
            handle.shutdown().await;
        }
    }
}
