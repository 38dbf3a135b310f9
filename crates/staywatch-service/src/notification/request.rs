//! Raw request inputs and their validation.
//!
//! Inputs arrive as optional strings so that every bad field can be
//! reported at once instead of failing on the first.

use std::borrow::Cow;
use std::str::FromStr;

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::{ValidationError, ValidationErrors};

use staywatch_entity::notification::{
    NotificationFilter, NotificationPriority, NotificationStatus, NotificationType, StatusUpdate,
    UnknownVariant,
};

/// Query-string filters for the notification list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationQuery {
    /// Guest identifier.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Notification type.
    #[serde(rename = "type", default)]
    pub notification_type: Option<String>,
    /// Priority.
    #[serde(default)]
    pub priority: Option<String>,
    /// Workflow status.
    #[serde(default)]
    pub status: Option<String>,
}

impl NotificationQuery {
    /// Validate every present field and build the filter.
    ///
    /// Empty strings count as absent.
    pub fn into_filter(self) -> Result<NotificationFilter, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let notification_type =
            parse_field::<NotificationType>(&mut errors, "type", "invalid_type", self.notification_type);
        let priority = parse_field::<NotificationPriority>(
            &mut errors,
            "priority",
            "invalid_priority",
            self.priority,
        );
        let status =
            parse_field::<NotificationStatus>(&mut errors, "status", "invalid_status", self.status);

        if !errors.errors().is_empty() {
            return Err(errors);
        }

        Ok(NotificationFilter {
            user_id: present(self.user_id),
            notification_type,
            priority,
            status,
        })
    }
}

/// Body of a status update call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    /// Hex notification id.
    #[serde(default)]
    pub id: Option<String>,
    /// Target status.
    #[serde(default)]
    pub status: Option<String>,
}

impl StatusUpdateRequest {
    /// Validate the body into a typed update and the parsed store id.
    pub fn validate(self) -> Result<(ObjectId, StatusUpdate), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let id = match present(self.id) {
            Some(raw) => match ObjectId::parse_str(&raw) {
                Ok(oid) => Some(oid),
                Err(_) => {
                    errors.add(
                        "id",
                        field_error("invalid_id", "id must be a 24-character hex ObjectId".into(), &raw),
                    );
                    None
                }
            },
            None => {
                errors.add("id", required("id"));
                None
            }
        };

        let status = match present(self.status.clone()) {
            Some(_) => {
                parse_field::<NotificationStatus>(&mut errors, "status", "invalid_status", self.status)
            }
            None => {
                errors.add("status", required("status"));
                None
            }
        };

        match (id, status) {
            (Some(oid), Some(status)) if errors.errors().is_empty() => Ok((
                oid,
                StatusUpdate {
                    id: oid.to_hex(),
                    status,
                },
            )),
            _ => Err(errors),
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_field<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    code: &'static str,
    raw: Option<String>,
) -> Option<T>
where
    T: FromStr<Err = UnknownVariant>,
{
    let raw = present(raw)?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(e) => {
            errors.add(field, field_error(code, e.to_string().into(), &raw));
            None
        }
    }
}

fn field_error(code: &'static str, message: Cow<'static, str>, value: &str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message);
    error.add_param(Cow::Borrowed("value"), &value);
    error
}

fn required(field: &'static str) -> ValidationError {
    let mut error = ValidationError::new("required");
    error.message = Some(Cow::Owned(format!("{field} is required")));
    error
}
