//! Notification queries and status transitions.

pub mod request;
pub mod service;

pub use request::{NotificationQuery, StatusUpdateRequest};
pub use service::NotificationService;
