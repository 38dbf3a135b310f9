//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use staywatch_auth::IdentityProvider;
use staywatch_core::config::AppConfig;
use staywatch_database::NotificationStore;
use staywatch_service::NotificationService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Identity provider used for sign-in, sign-up and token checks.
    pub identity: Arc<dyn IdentityProvider>,
    /// Notification queries and updates.
    pub notification_service: Arc<NotificationService>,
}

impl AppState {
    /// Wire the services around an already constructed store and provider.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn NotificationStore>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        let notification_service = Arc::new(NotificationService::new(
            store,
            config.notifications.clone(),
        ));
        Self {
            config: Arc::new(config),
            identity,
            notification_service,
        }
    }
}
