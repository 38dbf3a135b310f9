//! Request context carrying the authenticated identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use staywatch_entity::user::Identity;

/// Context for the current authenticated request.
///
/// Built by the API layer after the bearer token has been verified and
/// passed into every service call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Identity-provider account id.
    pub user_id: String,
    /// Account email.
    pub email: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context for the given identity.
    pub fn new(identity: &Identity) -> Self {
        Self {
            user_id: identity.user_id.clone(),
            email: identity.email.clone(),
            request_time: Utc::now(),
        }
    }

    /// Whether this request acts for the given account.
    pub fn is_user(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

impl From<Identity> for RequestContext {
    fn from(identity: Identity) -> Self {
        Self::new(&identity)
    }
}
