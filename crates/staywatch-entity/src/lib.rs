//! # staywatch-entity
//!
//! Domain entity models for StayWatch. Notifications are the only stored
//! resource; user types are value objects exchanged with the external
//! identity provider and never persisted locally.

pub mod notification;
pub mod user;

pub use notification::{
    GuestAlert, Notification, NotificationFilter, NotificationKind, NotificationPriority,
    NotificationStatus, NotificationType, StatusUpdate, SystemAlert,
};
pub use user::{Credentials, Identity, IdentitySession, Registration};
