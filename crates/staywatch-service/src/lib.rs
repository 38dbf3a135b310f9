//! # staywatch-service
//!
//! Business logic for StayWatch. Services receive their store through
//! constructor injection and take a [`RequestContext`] describing who is
//! acting.

pub mod context;
pub mod notification;

pub use context::RequestContext;
pub use notification::{NotificationQuery, NotificationService, StatusUpdateRequest};
