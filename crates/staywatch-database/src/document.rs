//! Mapping between stored notification documents and the canonical entity.
//!
//! Two producers write into the same collection:
//!
//! - guest requests: `userId`, `userName`, `roomNumber`, `priority`, `createdAt`
//! - vision alerts: `track_id`, `timestamp`, `created_at`, `images`
//!
//! [`normalize`] resolves both into [`Notification`] exactly once. A document
//! is a guest request when it has `userName`, or when it has any other guest
//! field and no `track_id`. The creation time is the first of `createdAt`,
//! `created_at`, `timestamp`.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDateTime, Utc};
use mongodb::bson::{Bson, Document, doc};
use thiserror::Error;

use staywatch_entity::notification::{
    GuestAlert, Notification, NotificationFilter, NotificationKind, NotificationPriority,
    NotificationStatus, NotificationType, SystemAlert, UnknownVariant,
};

/// Fields only guest requests carry.
const GUEST_FIELDS: [&str; 4] = ["userName", "userId", "roomNumber", "priority"];

/// Stored spellings of the creation timestamp, in precedence order.
pub const TIMESTAMP_FIELDS: [&str; 3] = ["createdAt", "created_at", "timestamp"];

/// Naive timestamp layouts accepted besides RFC 3339; interpreted as UTC.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// A stored document that cannot be represented as a [`Notification`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// `_id` is missing or of an unsupported type.
    #[error("document has no usable _id")]
    MissingId,
    /// `status` is missing.
    #[error("document {id} has no status")]
    MissingStatus {
        /// Offending document.
        id: String,
    },
    /// An enumerated field holds an out-of-domain value.
    #[error("document {id}: {source}")]
    OutOfDomain {
        /// Offending document.
        id: String,
        /// What was wrong.
        #[source]
        source: UnknownVariant,
    },
}

/// Build the store query for a filter: equality on each present predicate.
pub fn filter_document(filter: &NotificationFilter) -> Document {
    let mut query = Document::new();
    for (field, value) in filter.predicates() {
        query.insert(field, value);
    }
    query
}

/// Sort applied by the store before normalization.
pub fn sort_document() -> Document {
    doc! { "createdAt": -1 }
}

/// Whether `document` satisfies every equality predicate in `query`.
pub fn matches(document: &Document, query: &Document) -> bool {
    query
        .iter()
        .all(|(field, expected)| document.get(field) == Some(expected))
}

/// Convert a stored document into the canonical notification.
pub fn normalize(document: &Document) -> Result<Notification, NormalizeError> {
    let id = match document.get("_id") {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(Bson::String(s)) if !s.is_empty() => s.clone(),
        _ => return Err(NormalizeError::MissingId),
    };

    let status = match string_field(document, "status") {
        Some(raw) => parse_enum::<NotificationStatus>(&id, &raw)?,
        None => return Err(NormalizeError::MissingStatus { id }),
    };

    let notification_type = string_field(document, "type")
        .map(|raw| parse_enum::<NotificationType>(&id, &raw))
        .transpose()?;

    let kind = if is_guest(document) {
        NotificationKind::Guest(GuestAlert {
            user_id: scalar_field(document, "userId").unwrap_or_default(),
            user_name: string_field(document, "userName").unwrap_or_default(),
            room_number: scalar_field(document, "roomNumber").unwrap_or_default(),
            priority: string_field(document, "priority")
                .map(|raw| parse_enum::<NotificationPriority>(&id, &raw))
                .transpose()?,
        })
    } else {
        NotificationKind::System(SystemAlert {
            track_id: scalar_field(document, "track_id").unwrap_or_default(),
        })
    };

    let images = match document.get("images") {
        Some(Bson::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    };

    Ok(Notification {
        id,
        notification_type,
        status,
        title: string_field(document, "title"),
        description: string_field(document, "description").unwrap_or_default(),
        images,
        created_at: created_at(document),
        kind,
    })
}

/// Normalize a batch, dropping documents that violate the schema.
///
/// Upstream producers are outside our control, so one malformed document
/// must not hide the rest of the collection.
pub fn normalize_all(documents: &[Document]) -> Vec<Notification> {
    documents
        .iter()
        .filter_map(|document| match normalize(document) {
            Ok(notification) => Some(notification),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed notification document");
                None
            }
        })
        .collect()
}

/// Order newest first; undated notifications last. Stable for ties.
pub fn sort_newest_first(notifications: &mut [Notification]) {
    notifications.sort_by(|a, b| match (a.created_at, b.created_at) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Resolve the creation timestamp from whichever spelling is present.
pub fn created_at(document: &Document) -> Option<DateTime<Utc>> {
    TIMESTAMP_FIELDS
        .iter()
        .find_map(|field| document.get(*field))
        .and_then(parse_timestamp)
}

/// Interpret a stored timestamp value.
pub fn parse_timestamp(value: &Bson) -> Option<DateTime<Utc>> {
    match value {
        Bson::DateTime(dt) => DateTime::from_timestamp_millis(dt.timestamp_millis()),
        Bson::String(s) => parse_timestamp_str(s),
        _ => None,
    }
}

fn parse_timestamp_str(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn is_guest(document: &Document) -> bool {
    document.contains_key("userName")
        || (!document.contains_key("track_id")
            && GUEST_FIELDS.iter().any(|field| document.contains_key(field)))
}

fn parse_enum<T>(id: &str, raw: &str) -> Result<T, NormalizeError>
where
    T: std::str::FromStr<Err = UnknownVariant>,
{
    raw.parse::<T>().map_err(|source| NormalizeError::OutOfDomain {
        id: id.to_string(),
        source,
    })
}

fn string_field(document: &Document, field: &str) -> Option<String> {
    match document.get(field) {
        Some(Bson::String(s)) => Some(s.clone()),
        _ => None,
    }
}

/// Strings and integers both render as text (room numbers, tracker ids).
fn scalar_field(document: &Document, field: &str) -> Option<String> {
    match document.get(field)? {
        Bson::String(s) => Some(s.clone()),
        Bson::Int32(n) => Some(n.to_string()),
        Bson::Int64(n) => Some(n.to_string()),
        Bson::Double(n) if n.fract() == 0.0 => Some(format!("{n:.0}")),
        _ => None,
    }
}
