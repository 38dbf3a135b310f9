//! Typed HTTP helpers for the StayWatch API.

use std::time::Duration;

use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use staywatch_core::error::{AppError, ErrorKind};
use staywatch_entity::notification::{Notification, NotificationFilter, StatusUpdate};
use staywatch_entity::user::{Credentials, Registration};

/// Errors returned by the API helpers.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server could not be reached.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with an error body.
    #[error("{message}")]
    Api {
        /// HTTP status.
        status: u16,
        /// The server's `error` text.
        message: String,
        /// The server's machine-readable code.
        code: Option<String>,
        /// Per-field details, when present.
        details: Option<serde_json::Value>,
    },
    /// The base URL is unusable.
    #[error("invalid server URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        let kind = match err.status() {
            Some(400) => ErrorKind::Validation,
            Some(401) => ErrorKind::Authentication,
            Some(403) => ErrorKind::Authorization,
            Some(404) => ErrorKind::NotFound,
            Some(503) => ErrorKind::ServiceUnavailable,
            Some(_) => ErrorKind::Internal,
            None => ErrorKind::ExternalService,
        };
        let details = match &err {
            ClientError::Api { details, .. } => details.clone(),
            _ => None,
        };
        let mut app = AppError::new(kind, err.to_string());
        app.details = details;
        app
    }
}

/// Session returned by `/api/auth/login` and `/api/auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    /// Bearer token.
    pub id_token: String,
    /// Refresh token.
    #[serde(default)]
    pub refresh_token: String,
    /// Token lifetime in seconds.
    #[serde(default)]
    pub expires_in: u64,
    /// Account id.
    pub user_id: String,
    /// Account email.
    pub email: String,
    /// Display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Route to open next.
    pub redirect_to: String,
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct MessageBody {
    message: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    details: Option<serde_json::Value>,
}

/// Shared transport for both clients.
#[derive(Debug, Clone)]
struct Endpoint {
    http: reqwest::Client,
    base_url: Url,
}

impl Endpoint {
    fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { http, base_url })
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let text = response.text().await?;
        let (message, code, details) = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => (body.error, body.code, body.details),
            Err(_) => (format!("HTTP {status}"), None, None),
        };
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
            code,
            details,
        })
    }
}

/// Reads and updates notifications on behalf of a signed-in user.
#[derive(Debug, Clone)]
pub struct NotificationClient {
    endpoint: Endpoint,
    token: String,
}

impl NotificationClient {
    /// Client for `base_url` using the given bearer token.
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self, ClientError> {
        Ok(Self {
            endpoint: Endpoint::new(base_url)?,
            token: token.into(),
        })
    }

    /// Fetch notifications matching the filter, newest first.
    pub async fn fetch_notifications(
        &self,
        filter: &NotificationFilter,
    ) -> Result<Vec<Notification>, ClientError> {
        let mut url = self.endpoint.url("/api/notifications")?;
        if !filter.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in filter.predicates() {
                pairs.append_pair(name, &value);
            }
        }

        debug!(%url, "Fetching notifications");
        let response = self
            .endpoint
            .http
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?;
        Endpoint::decode(response).await
    }

    /// Set a notification's status; returns the server's message.
    pub async fn update_notification_status(
        &self,
        update: &StatusUpdate,
    ) -> Result<String, ClientError> {
        let response = self
            .endpoint
            .http
            .put(self.endpoint.url("/api/notifications")?)
            .bearer_auth(&self.token)
            .json(update)
            .send()
            .await?;
        let body: MessageBody = Endpoint::decode(response).await?;
        Ok(body.message)
    }
}

/// Signs in or registers against the server.
#[derive(Debug, Clone)]
pub struct AuthClient {
    endpoint: Endpoint,
}

impl AuthClient {
    /// Client for `base_url`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            endpoint: Endpoint::new(base_url)?,
        })
    }

    /// Sign in with email and password.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthSession, ClientError> {
        self.post("/api/auth/login", credentials).await
    }

    /// Create an account.
    pub async fn register(&self, registration: &Registration) -> Result<AuthSession, ClientError> {
        self.post("/api/auth/register", registration).await
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<AuthSession, ClientError> {
        let response = self
            .endpoint
            .http
            .post(self.endpoint.url(path)?)
            .json(body)
            .send()
            .await?;
        let envelope: Envelope<AuthSession> = Endpoint::decode(response).await?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join_keeps_host() {
        let endpoint = Endpoint::new("http://localhost:3000").unwrap();
        assert_eq!(
            endpoint.url("/api/notifications").unwrap().as_str(),
            "http://localhost:3000/api/notifications"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            NotificationClient::new("not a url", "t"),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_api_error_maps_to_kind() {
        let err = ClientError::Api {
            status: 403,
            message: "Not allowed".to_string(),
            code: Some("FORBIDDEN".to_string()),
            details: None,
        };
        let app: AppError = err.into();
        assert_eq!(app.kind, ErrorKind::Authorization);
        assert_eq!(app.message, "Not allowed");
    }
}
