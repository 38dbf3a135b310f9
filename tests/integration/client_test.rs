//! The CLI fetch helpers against a live server on an ephemeral port.

use staywatch_cli::{AuthClient, ClientError, NotificationClient};
use staywatch_entity::notification::{NotificationFilter, NotificationStatus, StatusUpdate};
use staywatch_entity::user::{Credentials, Registration};

use crate::helpers::TestApp;

#[tokio::test]
async fn test_auth_client_round_trip() {
    let app = TestApp::new();
    let base = app.spawn().await;
    let auth = AuthClient::new(&base).unwrap();

    let registered = auth
        .register(&Registration {
            email: "desk@hotel.test".to_string(),
            password: "front-desk-1".to_string(),
            display_name: Some("Desk".to_string()),
            confirm_password: None,
        })
        .await
        .unwrap();
    assert_eq!(registered.redirect_to, "/notifications/all");
    assert_eq!(registered.display_name.as_deref(), Some("Desk"));

    let err = auth
        .login(&Credentials {
            email: "desk@hotel.test".to_string(),
            password: "nope".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(
        err.to_string(),
        "Failed to log in. Please check your email and password."
    );
}

#[tokio::test]
async fn test_notification_client_fetch_and_update() {
    let app = TestApp::new();
    let user = app.register("desk@hotel.test").await;
    let first = app
        .seed_guest("guest-1", "pending", "high", "2024-03-01T08:00:00Z")
        .await;
    app.seed_guest("guest-2", "completed", "low", "2024-03-02T08:00:00Z")
        .await;
    app.seed_system(9, "pending", "2024-03-03T08:00:00Z").await;
    let base = app.spawn().await;

    let client = NotificationClient::new(&base, &user.token).unwrap();

    let all = client
        .fetch_notifications(&NotificationFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
    assert!(all[0].system().is_some());

    let pending = NotificationFilter {
        status: Some(NotificationStatus::Pending),
        user_id: Some("guest-1".to_string()),
        ..Default::default()
    };
    let found = client.fetch_notifications(&pending).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, first.to_hex());

    let message = client
        .update_notification_status(&StatusUpdate {
            id: first.to_hex(),
            status: NotificationStatus::InProgress,
        })
        .await
        .unwrap();
    assert_eq!(message, "Notification updated successfully");
    assert!(client.fetch_notifications(&pending).await.unwrap().is_empty());

    let missing = client
        .update_notification_status(&StatusUpdate {
            id: "65f1a00000000000000000ff".to_string(),
            status: NotificationStatus::Completed,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        missing,
        ClientError::Api { status: 404, ref message, .. } if message == "Notification not found"
    ));
}

#[tokio::test]
async fn test_notification_client_without_valid_token() {
    let app = TestApp::new();
    let base = app.spawn().await;
    let client = NotificationClient::new(&base, "mem.expired").unwrap();

    let err = client
        .fetch_notifications(&NotificationFilter::default())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(401));
}
