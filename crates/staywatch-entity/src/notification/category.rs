//! Enumerated notification classifications.
//!
//! Every enum round-trips through the exact wire spelling used by the
//! upstream producers (`"fall-detection"`, `"in-progress"`, ...), both in
//! serde and in [`std::str::FromStr`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A string did not match any variant of the named enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a valid {field}; expected one of: {expected}")]
pub struct UnknownVariant {
    /// Field the value was supplied for.
    pub field: &'static str,
    /// The rejected value.
    pub value: String,
    /// Comma-separated list of accepted values.
    pub expected: String,
}

/// Macro to define a closed string enum with a fixed wire spelling.
macro_rules! define_string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// All variants in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Return the wire spelling of this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    other => Err(UnknownVariant {
                        field: $field,
                        value: other.to_string(),
                        expected: [$($wire),+].join(", "),
                    }),
                }
            }
        }
    };
}

define_string_enum!(
    /// What kind of event raised the notification.
    NotificationType, "type" {
        /// A guest fall detected by the vision system.
        FallDetection => "fall-detection",
        /// A room-service request.
        RoomService => "room-service",
        /// An emergency call.
        Emergency => "emergency",
        /// A maintenance request.
        Maintenance => "maintenance",
    }
);

define_string_enum!(
    /// Urgency assigned to a guest notification.
    NotificationPriority, "priority" {
        /// Low urgency.
        Low => "low",
        /// Medium urgency.
        Medium => "medium",
        /// High urgency.
        High => "high",
    }
);

define_string_enum!(
    /// Handling progress. The only field staff may change.
    NotificationStatus, "status" {
        /// Not yet handled.
        Pending => "pending",
        /// Someone is on it.
        InProgress => "in-progress",
        /// Handled.
        Completed => "completed",
    }
);
