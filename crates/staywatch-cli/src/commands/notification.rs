//! `list`, `timeline` and `set-status` commands.

use std::str::FromStr;

use chrono::{Local, TimeZone, Utc};
use clap::Args;

use staywatch_core::error::AppError;
use staywatch_entity::notification::{
    Notification, NotificationFilter, NotificationPriority, NotificationStatus, NotificationType,
    StatusUpdate, UnknownVariant,
};

use crate::client::NotificationClient;
use crate::output::{self, OutputFormat};
use crate::view::{self, ListRow, TimelineEntry};

/// Arguments for `list`
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only this type (room-service, emergency, maintenance, fall-detection)
    #[arg(long = "type")]
    pub notification_type: Option<String>,
    /// Only this priority (low, medium, high)
    #[arg(long)]
    pub priority: Option<String>,
    /// Only this status (pending, in-progress, completed)
    #[arg(long)]
    pub status: Option<String>,
    /// Case-insensitive text search over description, guest name and track id
    #[arg(long)]
    pub search: Option<String>,
}

/// Arguments for `timeline`
#[derive(Debug, Args)]
pub struct TimelineArgs {
    /// Guest identifier
    pub user_id: String,
    /// Group by UTC days instead of local days
    #[arg(long)]
    pub utc: bool,
}

/// Arguments for `set-status`
#[derive(Debug, Args)]
pub struct SetStatusArgs {
    /// Notification id (24 hex digits)
    pub id: String,
    /// New status (pending, in-progress, completed)
    pub status: String,
}

fn parse<T: FromStr<Err = UnknownVariant>>(raw: Option<&str>) -> Result<Option<T>, AppError> {
    raw.filter(|v| !v.is_empty())
        .map(|v| v.parse::<T>())
        .transpose()
        .map_err(|e| AppError::validation(e.to_string()))
}

/// Fetch once, apply the search term, print the table.
pub async fn list(
    args: &ListArgs,
    client: &NotificationClient,
    format: OutputFormat,
) -> Result<(), AppError> {
    let filter = NotificationFilter {
        user_id: None,
        notification_type: parse::<NotificationType>(args.notification_type.as_deref())?,
        priority: parse::<NotificationPriority>(args.priority.as_deref())?,
        status: parse::<NotificationStatus>(args.status.as_deref())?,
    };

    let notifications = client.fetch_notifications(&filter).await?;
    let rows: Vec<ListRow> = view::search(&notifications, args.search.as_deref().unwrap_or(""))
        .into_iter()
        .map(ListRow::from)
        .collect();
    output::print_list(&rows, format);
    Ok(())
}

/// One guest's notifications, grouped by day.
pub async fn timeline(
    args: &TimelineArgs,
    client: &NotificationClient,
    format: OutputFormat,
) -> Result<(), AppError> {
    let filter = NotificationFilter {
        user_id: Some(args.user_id.clone()),
        ..Default::default()
    };
    let notifications = client.fetch_notifications(&filter).await?;

    if args.utc {
        render_timeline(&notifications, &Utc, format);
    } else {
        render_timeline(&notifications, &Local, format);
    }
    Ok(())
}

fn render_timeline<Tz>(notifications: &[Notification], tz: &Tz, format: OutputFormat)
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let header = view::guest_header(notifications);
    let groups = view::group_by_date(notifications, tz);

    if format == OutputFormat::Json {
        let days: Vec<_> = groups
            .iter()
            .map(|g| {
                serde_json::json!({
                    "date": g.label,
                    "entries": g.items.iter().map(|n| TimelineEntry::new(n, tz)).collect::<Vec<_>>(),
                })
            })
            .collect();
        output::print_json(&serde_json::json!({ "guest": header, "days": days }));
        return;
    }

    if let Some(header) = header {
        output::print_kv("Guest", &header.name);
        output::print_kv("Room", &header.room);
    }
    if groups.is_empty() {
        println!("No notifications found.");
    }
    for group in groups {
        output::print_heading(&group.label);
        let entries: Vec<TimelineEntry> =
            group.items.iter().map(|n| TimelineEntry::new(n, tz)).collect();
        output::print_list(&entries, format);
    }
}

/// Change one notification's status.
pub async fn set_status(args: &SetStatusArgs, client: &NotificationClient) -> Result<(), AppError> {
    let status = parse::<NotificationStatus>(Some(&args.status))?
        .ok_or_else(|| AppError::validation("status is required"))?;

    let message = client
        .update_notification_status(&StatusUpdate {
            id: args.id.clone(),
            status,
        })
        .await?;
    output::print_success(&message);
    Ok(())
}
