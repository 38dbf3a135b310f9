//! Request and response DTOs.

pub mod response;

pub use response::{ApiResponse, HealthResponse, MessageResponse, NotificationBody};
