//! Integration tests for sign-in, sign-up and the health probes.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

const GENERIC: &str = "Failed to log in. Please check your email and password.";

#[tokio::test]
async fn test_register_returns_session_and_redirect() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "email": "night@hotel.test",
                "password": "front-desk-1",
                "displayName": "Night Desk"
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    let data = &response.body["data"];
    assert!(data["idToken"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(data["email"], "night@hotel.test");
    assert_eq!(data["displayName"], "Night Desk");
    assert_eq!(data["redirectTo"], "/notifications/all");
    assert_eq!(data["expiresIn"], 3600);
}

#[tokio::test]
async fn test_login_success_and_token_opens_gate() {
    let app = TestApp::new();
    app.register("desk@hotel.test").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "desk@hotel.test", "password": "front-desk-1" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let token = response.body["data"]["idToken"].as_str().unwrap().to_string();

    let listed = app
        .request("GET", "/api/notifications", None, Some(&token))
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body, json!([]));
}

#[tokio::test]
async fn test_login_failures_share_generic_message() {
    let app = TestApp::new();
    app.register("desk@hotel.test").await;

    for body in [
        json!({ "email": "desk@hotel.test", "password": "wrong" }),
        json!({ "email": "nobody@hotel.test", "password": "front-desk-1" }),
        json!({ "email": "", "password": "" }),
    ] {
        let response = app.request("POST", "/api/auth/login", Some(body), None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.body["error"], GENERIC);
    }
}

#[tokio::test]
async fn test_register_shows_provider_message() {
    let app = TestApp::new();
    app.register("desk@hotel.test").await;

    let duplicate = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "email": "desk@hotel.test", "password": "another-pass" })),
            None,
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        duplicate.body["error"],
        "The email address is already in use by another account."
    );

    let weak = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "email": "new@hotel.test", "password": "123" })),
            None,
        )
        .await;
    assert_eq!(weak.status, StatusCode::UNAUTHORIZED);
    assert_eq!(weak.body["error"], "Password should be at least 6 characters");
}

#[tokio::test]
async fn test_register_validates_input() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "email": "not-an-email",
                "password": "front-desk-1",
                "confirmPassword": "front-desk-2"
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "VALIDATION_ERROR");
    assert!(response.body["details"]["email"].is_array());
    assert!(response.body["details"]["confirmPassword"].is_array());

    let missing = app
        .request("POST", "/api/auth/register", Some(json!({ "email": 5 })), None)
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.body["error"], "Invalid registration data");
}

#[tokio::test]
async fn test_health_probes() {
    let app = TestApp::new();

    let health = app.request("GET", "/api/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "ok");
    assert!(health.body["version"].is_string());

    let ready = app.request("GET", "/api/health/ready", None, None).await;
    assert_eq!(ready.status, StatusCode::OK);
}
