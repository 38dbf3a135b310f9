//! List and timeline view models.
//!
//! Everything here is pure: it takes notifications already fetched (newest
//! first) and derives what the terminal shows.

use std::fmt::Display;

use chrono::{NaiveDate, TimeZone};
use serde::Serialize;
use tabled::Tabled;

use staywatch_entity::notification::{Notification, NotificationKind};

/// Label of the group collecting notifications without a timestamp.
pub const UNKNOWN_DATE: &str = "Unknown date";

/// Case-insensitive substring search over description, guest name and
/// tracker id. An empty term keeps everything; order is preserved.
pub fn search<'a>(notifications: &'a [Notification], term: &str) -> Vec<&'a Notification> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return notifications.iter().collect();
    }

    notifications
        .iter()
        .filter(|n| {
            let haystack = match &n.kind {
                NotificationKind::Guest(guest) => &guest.user_name,
                NotificationKind::System(system) => &system.track_id,
            };
            n.description.to_lowercase().contains(&needle)
                || haystack.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Notifications sharing one calendar day.
#[derive(Debug, Clone)]
pub struct DateGroup<'a> {
    /// The day, in the viewer's time zone; `None` for undated records.
    pub date: Option<NaiveDate>,
    /// Heading, e.g. `Friday, March 1, 2024`.
    pub label: String,
    /// Members in input order.
    pub items: Vec<&'a Notification>,
}

/// Group by calendar day of `createdAt` in `tz`.
///
/// Groups appear in order of first occurrence and keep input order inside,
/// so newest-first input yields newest-first days.
pub fn group_by_date<'a, Tz>(notifications: &'a [Notification], tz: &Tz) -> Vec<DateGroup<'a>>
where
    Tz: TimeZone,
{
    let mut groups: Vec<DateGroup<'a>> = Vec::new();

    for notification in notifications {
        let date = notification
            .created_at
            .map(|ts| ts.with_timezone(tz).date_naive());

        match groups.iter_mut().find(|g| g.date == date) {
            Some(group) => group.items.push(notification),
            None => groups.push(DateGroup {
                date,
                label: date_label(date),
                items: vec![notification],
            }),
        }
    }

    groups
}

fn date_label(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format("%A, %B %-d, %Y").to_string(),
        None => UNKNOWN_DATE.to_string(),
    }
}

/// One row of the notification table.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ListRow {
    /// Store id.
    #[tabled(rename = "ID")]
    pub id: String,
    /// Guest name or `System Alert #<trackId>`.
    #[tabled(rename = "Source")]
    pub source: String,
    /// Room, guest rows only.
    #[tabled(rename = "Room")]
    pub room: String,
    /// Type.
    #[tabled(rename = "Type")]
    pub notification_type: String,
    /// Priority, guest rows only.
    #[tabled(rename = "Priority")]
    pub priority: String,
    /// Status.
    #[tabled(rename = "Status")]
    pub status: String,
    /// Description.
    #[tabled(rename = "Description")]
    pub description: String,
    /// Attached images, system rows only.
    #[tabled(rename = "Images")]
    pub images: String,
    /// Creation time, RFC 3339.
    #[tabled(rename = "Created")]
    pub created_at: String,
}

impl From<&Notification> for ListRow {
    fn from(n: &Notification) -> Self {
        let (source, room, priority, images) = match &n.kind {
            NotificationKind::Guest(guest) => (
                guest.user_name.clone(),
                guest.room_number.clone(),
                guest
                    .priority
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                String::new(),
            ),
            NotificationKind::System(system) => (
                system_label(&system.track_id),
                String::new(),
                String::new(),
                n.images.len().to_string(),
            ),
        };

        Self {
            id: n.id.clone(),
            source,
            room,
            notification_type: n
                .notification_type
                .map(|t| t.to_string())
                .unwrap_or_default(),
            priority,
            status: n.status.to_string(),
            description: n.description.clone(),
            images,
            created_at: n.created_at.map(|ts| ts.to_rfc3339()).unwrap_or_default(),
        }
    }
}

/// One entry of a guest's timeline.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct TimelineEntry {
    /// Local time of day, `HH:MM`.
    #[tabled(rename = "Time")]
    pub time: String,
    /// Title, or the description when untitled.
    #[tabled(rename = "Event")]
    pub event: String,
    /// Type.
    #[tabled(rename = "Type")]
    pub notification_type: String,
    /// Priority.
    #[tabled(rename = "Priority")]
    pub priority: String,
    /// Status.
    #[tabled(rename = "Status")]
    pub status: String,
    /// Number of attached images.
    #[tabled(rename = "Images")]
    pub images: usize,
}

impl TimelineEntry {
    /// Entry rendered in `tz`.
    pub fn new<Tz>(n: &Notification, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let event = match (&n.title, &n.kind) {
            (Some(title), _) if !title.is_empty() => title.clone(),
            (_, NotificationKind::System(system)) if n.description.is_empty() => {
                system_label(&system.track_id)
            }
            _ => n.description.clone(),
        };

        Self {
            time: n
                .created_at
                .map(|ts| ts.with_timezone(tz).format("%H:%M").to_string())
                .unwrap_or_else(|| "--:--".to_string()),
            event,
            notification_type: n
                .notification_type
                .map(|t| t.to_string())
                .unwrap_or_default(),
            priority: n.priority().map(|p| p.to_string()).unwrap_or_default(),
            status: n.status.to_string(),
            images: n.images.len(),
        }
    }
}

/// Guest named at the top of a timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuestHeader {
    /// Guest display name.
    pub name: String,
    /// Room number.
    pub room: String,
}

/// Name and room from the first guest record, if any.
pub fn guest_header(notifications: &[Notification]) -> Option<GuestHeader> {
    notifications.iter().find_map(|n| {
        n.guest().map(|guest| GuestHeader {
            name: guest.user_name.clone(),
            room: guest.room_number.clone(),
        })
    })
}

fn system_label(track_id: &str) -> String {
    format!("System Alert #{track_id}")
}
