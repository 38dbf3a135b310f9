//! Notification domain entities.

pub mod category;
pub mod filter;
pub mod model;
pub mod update;

pub use category::{NotificationPriority, NotificationStatus, NotificationType, UnknownVariant};
pub use filter::NotificationFilter;
pub use model::{GuestAlert, Notification, NotificationKind, SystemAlert};
pub use update::StatusUpdate;
