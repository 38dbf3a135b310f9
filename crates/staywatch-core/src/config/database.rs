//! Document store configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Document store connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Store backend: `"mongodb"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// MongoDB connection string. Required for the `mongodb` provider.
    #[serde(default)]
    pub uri: String,
    /// Database holding the notifications collection.
    #[serde(default = "default_database_name")]
    pub database_name: String,
    /// Collection holding notification documents.
    #[serde(default = "default_collection_name")]
    pub collection_name: String,
    /// Maximum number of pooled connections.
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: u32,
    /// Minimum number of pooled connections.
    #[serde(default)]
    pub min_pool_size: u32,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Server selection timeout in seconds.
    #[serde(default = "default_server_selection_timeout")]
    pub server_selection_timeout_seconds: u64,
    /// JSON file of documents loaded into the `memory` provider at startup.
    #[serde(default)]
    pub seed_file: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            uri: String::new(),
            database_name: default_database_name(),
            collection_name: default_collection_name(),
            max_pool_size: default_max_pool_size(),
            min_pool_size: 0,
            connect_timeout_seconds: default_connect_timeout(),
            server_selection_timeout_seconds: default_server_selection_timeout(),
            seed_file: None,
        }
    }
}

impl DatabaseConfig {
    /// Fail fast when the selected provider cannot be constructed.
    pub fn validate(&self) -> Result<(), AppError> {
        match self.provider.as_str() {
            "mongodb" if self.uri.trim().is_empty() => Err(AppError::configuration(format!(
                "Missing document store URI: set {} or database.uri",
                super::MONGODB_URI_ENV
            ))),
            "mongodb" | "memory" => Ok(()),
            other => Err(AppError::configuration(format!(
                "Unknown database provider: '{other}'. Supported: mongodb, memory"
            ))),
        }
    }
}

fn default_provider() -> String {
    "mongodb".to_string()
}

fn default_database_name() -> String {
    "fall_detection".to_string()
}

fn default_collection_name() -> String {
    "falls".to_string()
}

fn default_max_pool_size() -> u32 {
    20
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_server_selection_timeout() -> u64 {
    10
}
