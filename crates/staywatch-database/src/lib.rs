//! # staywatch-database
//!
//! MongoDB connection management, normalization of stored notification
//! documents into the canonical entity, and the notification repositories
//! (MongoDB and in-memory) behind the [`NotificationStore`] trait.

pub mod connection;
pub mod document;
pub mod error;
pub mod provider;
pub mod repositories;
pub mod store;

pub use connection::DatabaseHandle;
pub use error::StoreError;
pub use provider::StoreManager;
pub use repositories::{MemoryNotificationStore, NotificationRepository};
pub use store::{NotificationStore, UpdateOutcome};
