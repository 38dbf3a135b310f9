//! MongoDB client management.

use std::time::Duration;

use mongodb::bson::{Document, doc};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use tracing::info;

use staywatch_core::config::DatabaseConfig;
use staywatch_core::error::{AppError, ErrorKind};

use crate::error::StoreError;

/// Owned handle to the document store.
///
/// Built once at startup and injected wherever the notifications collection
/// is needed. The underlying client pools connections internally and is
/// safe to share across tasks; call [`DatabaseHandle::shutdown`] on exit.
#[derive(Debug, Clone)]
pub struct DatabaseHandle {
    /// The MongoDB client.
    client: Client,
    /// The configured database.
    database: Database,
    /// Name of the notifications collection.
    collection_name: String,
}

impl DatabaseHandle {
    /// Create a new handle from configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        if config.uri.trim().is_empty() {
            return Err(AppError::configuration(
                "Missing document store URI: set MONGODB_URI or database.uri",
            ));
        }

        info!(
            uri = %mask_password(&config.uri),
            database = %config.database_name,
            collection = %config.collection_name,
            max_pool_size = config.max_pool_size,
            "Connecting to MongoDB"
        );

        let mut options = ClientOptions::parse(&config.uri).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid MongoDB connection string: {e}"),
                e,
            )
        })?;
        options.app_name = Some("staywatch".to_string());
        options.max_pool_size = Some(config.max_pool_size);
        options.min_pool_size = Some(config.min_pool_size);
        options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_seconds));
        options.server_selection_timeout =
            Some(Duration::from_secs(config.server_selection_timeout_seconds));

        let client = Client::with_options(options).map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to create MongoDB client: {e}"),
                e,
            )
        })?;
        let database = client.database(&config.database_name);

        info!("MongoDB client ready");
        Ok(Self {
            client,
            database,
            collection_name: config.collection_name.clone(),
        })
    }

    /// Return the notifications collection as raw documents.
    ///
    /// Documents stay untyped here: two producer shapes share the
    /// collection and are normalized by [`crate::document::normalize`].
    pub fn notifications_collection(&self) -> Collection<Document> {
        self.database.collection::<Document>(&self.collection_name)
    }

    /// Check store connectivity with a `ping` command.
    pub async fn health_check(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    /// Close all pooled connections.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
        info!("MongoDB client closed");
    }
}

/// Mask the password portion of a connection string for safe logging.
fn mask_password(uri: &str) -> String {
    if let Some(at_pos) = uri.rfind('@') {
        let scheme_end = uri.find("://").map(|p| p + 3).unwrap_or(0);
        if let Some(colon_pos) = uri[..at_pos].rfind(':') {
            if colon_pos > scheme_end {
                return format!("{}:****@{}", &uri[..colon_pos], &uri[at_pos + 1..]);
            }
        }
    }
    uri.to_string()
}
