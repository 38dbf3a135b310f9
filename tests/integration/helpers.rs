//! Shared test helpers for integration tests.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Document, doc};
use serde_json::Value;
use tower::ServiceExt;

use staywatch_api::{AppState, build_router};
use staywatch_auth::MemoryIdentityProvider;
use staywatch_core::config::AppConfig;
use staywatch_database::{MemoryNotificationStore, NotificationStore, StoreError, UpdateOutcome};
use staywatch_entity::notification::{Notification, NotificationFilter, NotificationStatus};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Store behind the router, for seeding and direct inspection
    pub store: Arc<MemoryNotificationStore>,
}

/// Status and decoded JSON body of a response
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// A registered account
#[derive(Debug, Clone)]
pub struct TestUser {
    pub user_id: String,
    pub token: String,
}

impl TestApp {
    /// App with default configuration
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// App that restricts `userId` filters to the caller
    pub fn bound() -> Self {
        let mut config = AppConfig::default();
        config.notifications.bind_user_filter = true;
        Self::with_config(config)
    }

    pub fn with_config(config: AppConfig) -> Self {
        let store = Arc::new(MemoryNotificationStore::new());
        let identity = Arc::new(MemoryIdentityProvider::new());
        let router = build_router(AppState::new(config, store.clone(), identity));
        Self { router, store }
    }

    /// App whose store fails every call
    pub fn with_broken_store() -> Self {
        let identity = Arc::new(MemoryIdentityProvider::new());
        let router = build_router(AppState::new(
            AppConfig::default(),
            Arc::new(BrokenStore),
            identity,
        ));
        Self {
            router,
            store: Arc::new(MemoryNotificationStore::new()),
        }
    }

    /// Insert a guest request
    pub async fn seed_guest(
        &self,
        user_id: &str,
        status: &str,
        priority: &str,
        created_at: &str,
    ) -> ObjectId {
        self.store
            .insert(doc! {
                "userId": user_id,
                "userName": format!("Guest {user_id}"),
                "roomNumber": "210",
                "type": "room-service",
                "priority": priority,
                "status": status,
                "description": format!("Request from {user_id}"),
                "createdAt": created_at,
            })
            .await
    }

    /// Insert a vision-system alert
    pub async fn seed_system(&self, track_id: i32, status: &str, timestamp: &str) -> ObjectId {
        self.store
            .insert(doc! {
                "track_id": track_id,
                "type": "fall-detection",
                "status": status,
                "description": "Person down",
                "images": ["https://cdn.test/1.jpg"],
                "timestamp": timestamp,
            })
            .await
    }

    /// Raw stored document
    pub async fn raw(&self, id: ObjectId) -> Document {
        self.store.raw(id).await.expect("document exists")
    }

    /// Register an account through the API and return its token
    pub async fn register(&self, email: &str) -> TestUser {
        let response = self
            .request(
                "POST",
                "/api/auth/register",
                Some(serde_json::json!({ "email": email, "password": "front-desk-1" })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        TestUser {
            user_id: response.body["data"]["userId"]
                .as_str()
                .expect("userId")
                .to_string(),
            token: response.body["data"]["idToken"]
                .as_str()
                .expect("idToken")
                .to_string(),
        }
    }

    /// Make an HTTP request with a JSON body
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body = body
            .map(|b| serde_json::to_string(&b).expect("serialize body"))
            .unwrap_or_default();
        self.request_raw(method, path, body, token).await
    }

    /// Make an HTTP request with a raw body
    pub async fn request_raw(
        &self,
        method: &str,
        path: &str,
        body: String,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        let req = req.body(Body::from(body)).expect("build request");

        let response = self.router.clone().oneshot(req).await.expect("request");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("read body")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Serve the router on an ephemeral local port and return its base URL
    pub async fn spawn(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let router = self.router.clone();
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve");
        });
        format!("http://{addr}")
    }
}

/// Store that fails every call
#[derive(Debug)]
struct BrokenStore;

#[async_trait]
impl NotificationStore for BrokenStore {
    async fn find(&self, _: &NotificationFilter) -> Result<Vec<Notification>, StoreError> {
        Err(StoreError::InvalidSeed("connection reset".to_string()))
    }

    async fn set_status(
        &self,
        _: ObjectId,
        _: NotificationStatus,
    ) -> Result<UpdateOutcome, StoreError> {
        Err(StoreError::InvalidSeed("connection reset".to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::InvalidSeed("connection reset".to_string()))
    }
}
