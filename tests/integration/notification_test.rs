//! Integration tests for the notification endpoints.

use http::StatusCode;
use mongodb::bson::oid::ObjectId;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_filter_by_status_returns_only_matches() {
    let app = TestApp::new();
    let user = app.register("desk@hotel.test").await;
    for (i, status) in ["pending", "completed", "pending", "completed", "pending"]
        .iter()
        .enumerate()
    {
        app.seed_guest(
            &format!("guest-{i}"),
            status,
            "low",
            &format!("2024-03-0{}T10:00:00Z", i + 1),
        )
        .await;
    }

    let response = app
        .request("GET", "/api/notifications?status=pending", None, Some(&user.token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let items = response.body.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|n| n["status"] == "pending"));
}

#[tokio::test]
async fn test_list_all_newest_first_with_both_shapes() {
    let app = TestApp::new();
    let user = app.register("desk@hotel.test").await;
    app.seed_guest("guest-1", "pending", "high", "2024-03-01T08:00:00Z").await;
    app.seed_system(42, "pending", "2024-03-02 08:00:00").await;
    app.store
        .insert(mongodb::bson::doc! {
            "userId": "guest-2", "userName": "No Date", "status": "pending",
            "description": "undated",
        })
        .await;

    let response = app
        .request("GET", "/api/notifications", None, Some(&user.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let items = response.body.as_array().unwrap();
    assert_eq!(items.len(), 3);

    let system = &items[0];
    assert_eq!(system["kind"], "system");
    assert_eq!(system["trackId"], "42");
    assert_eq!(system["images"][0], "https://cdn.test/1.jpg");
    assert_eq!(system["_id"], system["id"]);

    let guest = &items[1];
    assert_eq!(guest["kind"], "guest");
    assert_eq!(guest["userName"], "Guest guest-1");
    assert_eq!(guest["priority"], "high");
    assert_eq!(guest["createdAt"], "2024-03-01T08:00:00Z");

    assert_eq!(items[2]["description"], "undated");
    assert!(items[2]["createdAt"].is_null());
}

#[tokio::test]
async fn test_conjunction_and_empty_params() {
    let app = TestApp::new();
    let user = app.register("desk@hotel.test").await;
    app.seed_guest("guest-1", "pending", "high", "2024-03-01T08:00:00Z").await;
    app.seed_guest("guest-2", "pending", "low", "2024-03-01T09:00:00Z").await;
    app.seed_system(7, "pending", "2024-03-01T10:00:00Z").await;

    let response = app
        .request(
            "GET",
            "/api/notifications?type=room-service&priority=high&status=pending",
            None,
            Some(&user.token),
        )
        .await;
    let items = response.body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["userId"], "guest-1");

    let response = app
        .request(
            "GET",
            "/api/notifications?type=&priority=&status=",
            None,
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_invalid_filter_is_rejected() {
    let app = TestApp::new();
    let user = app.register("desk@hotel.test").await;

    let response = app
        .request(
            "GET",
            "/api/notifications?priority=urgent&type=fire",
            None,
            Some(&user.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Invalid filter parameters");
    assert_eq!(response.body["code"], "VALIDATION_ERROR");
    assert_eq!(response.body["details"]["priority"][0]["code"], "invalid_priority");
    assert_eq!(response.body["details"]["type"][0]["params"]["value"], "fire");
}

#[tokio::test]
async fn test_user_filter_bound_to_caller() {
    let app = TestApp::bound();
    let user = app.register("guest@hotel.test").await;
    app.seed_guest(&user.user_id, "pending", "low", "2024-03-01T08:00:00Z").await;
    app.seed_guest("someone-else", "pending", "low", "2024-03-01T09:00:00Z").await;

    let own = app
        .request(
            "GET",
            &format!("/api/notifications?userId={}", user.user_id),
            None,
            Some(&user.token),
        )
        .await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.body.as_array().unwrap().len(), 1);

    let foreign = app
        .request(
            "GET",
            "/api/notifications?userId=someone-else",
            None,
            Some(&user.token),
        )
        .await;
    assert_eq!(foreign.status, StatusCode::FORBIDDEN);
    assert_eq!(foreign.body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_default_config_filters_any_user() {
    let app = TestApp::new();
    let staff = app.register("desk@hotel.test").await;
    let first = app.seed_guest("guest-9", "pending", "high", "2024-03-01T08:00:00Z").await;
    app.seed_guest("guest-9", "completed", "low", "2024-03-02T08:00:00Z").await;
    app.seed_guest("guest-4", "pending", "high", "2024-03-03T08:00:00Z").await;

    let by_user = app
        .request("GET", "/api/notifications?userId=guest-9", None, Some(&staff.token))
        .await;
    assert_eq!(by_user.status, StatusCode::OK);
    let items = by_user.body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|n| n["userId"] == "guest-9"));

    let narrowed = app
        .request(
            "GET",
            "/api/notifications?userId=guest-9&status=pending&priority=high",
            None,
            Some(&staff.token),
        )
        .await;
    assert_eq!(narrowed.status, StatusCode::OK);
    let items = narrowed.body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], first.to_hex());
}

#[tokio::test]
async fn test_update_then_list_shows_new_status() {
    let app = TestApp::new();
    let user = app.register("desk@hotel.test").await;
    let id = app.seed_guest("guest-1", "pending", "medium", "2024-03-01T08:00:00Z").await;
    let before = app.raw(id).await;

    let response = app
        .request(
            "PUT",
            "/api/notifications",
            Some(json!({ "id": id.to_hex(), "status": "completed" })),
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({ "success": true, "message": "Notification updated successfully" })
    );

    let mut after = app.raw(id).await;
    assert_eq!(after.get_str("status").unwrap(), "completed");
    after.insert("status", "pending");
    assert_eq!(after, before);

    let listed = app
        .request(
            "GET",
            "/api/notifications?status=completed",
            None,
            Some(&user.token),
        )
        .await;
    assert_eq!(listed.body[0]["id"], id.to_hex());
}

#[tokio::test]
async fn test_update_same_status_still_succeeds() {
    let app = TestApp::new();
    let user = app.register("desk@hotel.test").await;
    let id = app.seed_guest("guest-1", "completed", "low", "2024-03-01T08:00:00Z").await;

    let response = app
        .request(
            "PUT",
            "/api/notifications",
            Some(json!({ "id": id.to_hex(), "status": "completed" })),
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let app = TestApp::new();
    let user = app.register("desk@hotel.test").await;

    let response = app
        .request(
            "PUT",
            "/api/notifications",
            Some(json!({ "id": ObjectId::new().to_hex(), "status": "completed" })),
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "Notification not found");
}

#[tokio::test]
async fn test_update_out_of_domain_status_leaves_record() {
    let app = TestApp::new();
    let user = app.register("desk@hotel.test").await;
    let id = app.seed_guest("guest-1", "pending", "low", "2024-03-01T08:00:00Z").await;

    let response = app
        .request(
            "PUT",
            "/api/notifications",
            Some(json!({ "id": id.to_hex(), "status": "archived" })),
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Invalid request data");
    assert_eq!(response.body["details"]["status"][0]["code"], "invalid_status");
    assert_eq!(app.raw(id).await.get_str("status").unwrap(), "pending");
}

#[tokio::test]
async fn test_update_malformed_bodies() {
    let app = TestApp::new();
    let user = app.register("desk@hotel.test").await;

    let missing = app
        .request("PUT", "/api/notifications", Some(json!({})), Some(&user.token))
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.body["details"]["id"][0]["code"], "required");
    assert_eq!(missing.body["details"]["status"][0]["code"], "required");

    let bad_id = app
        .request(
            "PUT",
            "/api/notifications",
            Some(json!({ "id": "12345", "status": "pending" })),
            Some(&user.token),
        )
        .await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_id.body["details"]["id"][0]["code"], "invalid_id");

    let not_json = app
        .request_raw(
            "PUT",
            "/api/notifications",
            "{not json".to_string(),
            Some(&user.token),
        )
        .await;
    assert_eq!(not_json.status, StatusCode::BAD_REQUEST);
    assert_eq!(not_json.body["error"], "Invalid request data");
    assert!(not_json.body["details"]["body"].is_array());
}

#[tokio::test]
async fn test_login_gate() {
    let app = TestApp::new();
    app.seed_guest("guest-1", "pending", "low", "2024-03-01T08:00:00Z").await;

    let anonymous = app.request("GET", "/api/notifications", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
    assert!(anonymous.body["error"].is_string());

    let forged = app
        .request("GET", "/api/notifications", None, Some("mem.forged"))
        .await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);

    let put = app
        .request(
            "PUT",
            "/api/notifications",
            Some(json!({ "id": ObjectId::new().to_hex(), "status": "completed" })),
            None,
        )
        .await;
    assert_eq!(put.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_store_failure_is_500_and_not_ready() {
    let app = TestApp::with_broken_store();
    let user = app.register("desk@hotel.test").await;

    let response = app
        .request("GET", "/api/notifications", None, Some(&user.token))
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "Failed to fetch notifications");
    assert_eq!(response.body["code"], "INTERNAL_ERROR");

    let update = app
        .request(
            "PUT",
            "/api/notifications",
            Some(json!({ "id": ObjectId::new().to_hex(), "status": "completed" })),
            Some(&user.token),
        )
        .await;
    assert_eq!(update.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(update.body["error"], "Failed to update notification");

    let ready = app.request("GET", "/api/health/ready", None, None).await;
    assert_eq!(ready.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(ready.body["code"], "SERVICE_UNAVAILABLE");
}
