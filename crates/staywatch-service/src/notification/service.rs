//! Notification listing and status updates.

use std::sync::Arc;

use tracing::{error, info, warn};
use validator::ValidationErrors;

use staywatch_core::config::NotificationConfig;
use staywatch_core::error::{AppError, ErrorKind};
use staywatch_database::NotificationStore;
use staywatch_entity::notification::Notification;

use super::request::{NotificationQuery, StatusUpdateRequest};
use crate::context::RequestContext;

/// Reads and updates notifications in the shared store.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Notification store.
    store: Arc<dyn NotificationStore>,
    /// Query settings.
    config: NotificationConfig,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(store: Arc<dyn NotificationStore>, config: NotificationConfig) -> Self {
        Self { store, config }
    }

    /// Lists notifications matching every supplied filter, newest first.
    ///
    /// Invalid filters are rejected before the store is queried.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        query: NotificationQuery,
    ) -> Result<Vec<Notification>, AppError> {
        let filter = query
            .into_filter()
            .map_err(|errors| invalid("Invalid filter parameters", &errors))?;

        if self.config.bind_user_filter {
            if let Some(user_id) = filter.user_id.as_deref() {
                if !ctx.is_user(user_id) {
                    warn!(
                        user_id = %ctx.user_id,
                        requested = %user_id,
                        "Rejected notification query for another user"
                    );
                    return Err(AppError::authorization(
                        "Not allowed to read another user's notifications",
                    ));
                }
            }
        }

        self.store.find(&filter).await.map_err(|e| {
            error!(error = %e, "Failed to fetch notifications");
            AppError::with_source(ErrorKind::Database, "Failed to fetch notifications", e)
        })
    }

    /// Sets the status of one notification. Nothing else is written.
    pub async fn update_status(
        &self,
        ctx: &RequestContext,
        request: StatusUpdateRequest,
    ) -> Result<(), AppError> {
        let (oid, update) = request
            .validate()
            .map_err(|errors| invalid("Invalid request data", &errors))?;

        let outcome = self
            .store
            .set_status(oid, update.status)
            .await
            .map_err(|e| {
                error!(id = %update.id, error = %e, "Failed to update notification");
                AppError::with_source(ErrorKind::Database, "Failed to update notification", e)
            })?;

        if outcome.matched == 0 {
            return Err(AppError::not_found("Notification not found"));
        }

        info!(
            id = %update.id,
            status = %update.status,
            user_id = %ctx.user_id,
            changed = outcome.modified > 0,
            "Notification status updated"
        );
        Ok(())
    }

    /// Checks that the store is reachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.store.ping().await.map_err(|e| {
            warn!(error = %e, "Notification store is not reachable");
            AppError::with_source(ErrorKind::ServiceUnavailable, "Notification store unavailable", e)
        })
    }
}

fn invalid(message: &str, errors: &ValidationErrors) -> AppError {
    AppError::validation(message).with_details(serde_json::to_value(errors).unwrap_or_default())
}
