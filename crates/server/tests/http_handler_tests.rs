//! HTTP handler tests for API endpoints.
//!
//! Drives the full router with an in-memory database behind it.

mod common;

use axum_test::TestServer;
use chip_tracker::{AppResources, api, config::AppConfig, store::ChipStore};
use serde_json::{Value, json};
use std::sync::Arc;

fn server_with(store: ChipStore) -> TestServer {
    let resources = AppResources {
        store,
        config: Arc::new(AppConfig::default()),
    };
    TestServer::new(api::app(resources)).expect("create test server")
}

async fn test_server() -> TestServer {
    server_with(common::test_store().await)
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = server_with(ChipStore::unavailable());
    let response = server.get("/healthz").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "ok");
}

#[tokio::test]
async fn test_api_docs_are_served() {
    let server = server_with(ChipStore::unavailable());
    server.get("/api-docs").await.assert_status_ok();
}

#[tokio::test]
async fn test_phone_number_flow() {
    let server = test_server().await;

    let op: Value = server
        .post("/api/v1/users/1/operations")
        .json(&json!({ "name": "Launch" }))
        .await
        .json();
    let op_id = op["id"].as_i64().unwrap();
    assert_eq!(op["user_id"], 1);

    let response = server
        .post("/api/v1/users/1/phone-numbers")
        .json(&json!({ "number": "+55 11 90000-0001", "operation_id": op_id, "operator": "Vivo" }))
        .await;
    response.assert_status_ok();
    let number: Value = response.json();
    let id = number["id"].as_i64().unwrap();
    assert_eq!(number["status"], "unknown");
    assert_eq!(number["tier"], "B");
    assert_eq!(number["risk_score"], 50);

    server
        .post("/api/v1/users/1/phone-numbers")
        .json(&json!({ "number": "+55 11 90000-0002", "operation_id": op_id, "operator": "Claro" }))
        .await
        .assert_status_ok();

    let all: Vec<Value> = server.get("/api/v1/users/1/phone-numbers").await.json();
    assert_eq!(all.len(), 2);
    let vivo: Vec<Value> = server
        .get("/api/v1/users/1/phone-numbers?operator=Vivo")
        .await
        .json();
    assert_eq!(vivo.len(), 1);
    assert_eq!(vivo[0]["id"].as_i64(), Some(id));
    let blank: Vec<Value> = server
        .get("/api/v1/users/1/phone-numbers?operator=&query=")
        .await
        .json();
    assert_eq!(blank.len(), 2);
    let blank_typed: Vec<Value> = server
        .get("/api/v1/users/1/phone-numbers?status=&operation_id=")
        .await
        .json();
    assert_eq!(blank_typed.len(), 2);
    let by_op: Vec<Value> = server
        .get(&format!("/api/v1/users/1/phone-numbers?status=unknown&operation_id={op_id}"))
        .await
        .json();
    assert_eq!(by_op.len(), 2);
    server
        .get("/api/v1/users/1/phone-numbers?status=gone")
        .await
        .assert_status_bad_request();

    let patched: Value = server
        .patch(&format!("/api/v1/phone-numbers/{id}"))
        .json(&json!({ "status": "blocked", "operator": null }))
        .await
        .json();
    assert_eq!(patched["status"], "blocked");
    assert_eq!(patched["operator"], Value::Null);
    assert_eq!(patched["number"], "+55 11 90000-0001");

    for (event_type, at) in [
        ("block", "2025-03-01T00:00:00Z"),
        ("unblock", "2025-03-01T05:00:00Z"),
        ("block", "2025-03-01T10:00:00Z"),
        ("unblock", "2025-03-01T22:00:00Z"),
    ] {
        server
            .post(&format!("/api/v1/phone-numbers/{id}/events"))
            .json(&json!({ "event_type": event_type, "event_date": at }))
            .await
            .assert_status_ok();
    }
    let stats: Value = server
        .get(&format!("/api/v1/phone-numbers/{id}/stats"))
        .await
        .json();
    assert_eq!(stats["block_count"], 2);
    assert_eq!(stats["avg_recovery_time_hours"], 9);
    assert_eq!(stats["max_daily_volume"], 0);
    let history: Vec<Value> = server
        .get(&format!("/api/v1/phone-numbers/{id}/volume-history?days={}", u32::MAX))
        .await
        .json();
    assert!(history.is_empty());

    let dashboard: Value = server.get("/api/v1/users/1/dashboard").await.json();
    assert_eq!(dashboard["total"], 2);
    assert_eq!(dashboard["by_status"]["blocked"].as_array().unwrap().len(), 1);
    assert_eq!(dashboard["by_status"]["unknown"].as_array().unwrap().len(), 1);

    let deleted: Value = server
        .delete(&format!("/api/v1/phone-numbers/{id}"))
        .await
        .json();
    assert_eq!(deleted, json!({ "success": true }));

    let response = server.get(&format!("/api/v1/phone-numbers/{id}")).await;
    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["error"], "not_found");

    let events: Vec<Value> = server
        .get(&format!("/api/v1/phone-numbers/{id}/events"))
        .await
        .json();
    assert!(events.is_empty());
}

#[tokio::test]
async fn test_invalid_input_is_rejected() {
    let server = test_server().await;

    let response = server
        .post("/api/v1/users/1/phone-numbers")
        .json(&json!({ "number": "call me", "operation_id": 1 }))
        .await;
    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"], "bad_request");
    assert!(body["error_description"].as_str().unwrap().contains("invalid character"));

    let response = server
        .post("/api/v1/users/1/tags")
        .json(&json!({ "name": "vip", "color": "blue" }))
        .await;
    response.assert_status_bad_request();

    let response = server
        .post("/api/v1/users/1/operations")
        .json(&json!({ "name": "   " }))
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_tag_links() {
    let server = test_server().await;
    let number: Value = server
        .post("/api/v1/users/1/phone-numbers")
        .json(&json!({ "number": "+5511900000003", "operation_id": 1 }))
        .await
        .json();
    let id = number["id"].as_i64().unwrap();
    let tag: Value = server
        .post("/api/v1/users/1/tags")
        .json(&json!({ "name": "vip", "color": "#ff8800" }))
        .await
        .json();
    let tag_id = tag["id"].as_i64().unwrap();

    let linked: Value = server
        .put(&format!("/api/v1/phone-numbers/{id}/tags/{tag_id}"))
        .await
        .json();
    assert_eq!(linked["success"], true);
    let tags: Vec<Value> = server
        .get(&format!("/api/v1/phone-numbers/{id}/tags"))
        .await
        .json();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0]["name"], "vip");

    server
        .delete(&format!("/api/v1/phone-numbers/{id}/tags/{tag_id}"))
        .await
        .assert_status_ok();
    let tags: Vec<Value> = server
        .get(&format!("/api/v1/phone-numbers/{id}/tags"))
        .await
        .json();
    assert!(tags.is_empty());
}

#[tokio::test]
async fn test_alarm_endpoints() {
    let server = test_server().await;
    let number: Value = server
        .post("/api/v1/users/1/phone-numbers")
        .json(&json!({ "number": "+5511900000004", "operation_id": 1 }))
        .await
        .json();
    let number_id = number["id"].as_i64().unwrap();

    let alarm: Value = server
        .post("/api/v1/users/1/alarms")
        .json(&json!({
            "phone_number_id": number_id,
            "restriction_start_time": "2025-03-01T00:00:00Z",
            "expected_return_time": "2025-03-02T00:00:00Z",
            "notify_at": "2025-03-01T23:00:00Z"
        }))
        .await
        .json();
    let alarm_id = alarm["id"].as_i64().unwrap();
    assert_eq!(alarm["is_active"], true);
    assert_eq!(alarm["was_notified"], false);

    let due: Vec<Value> = server.get("/api/v1/alarms/due").await.json();
    assert_eq!(due.len(), 1);
    let active: Vec<Value> = server.get("/api/v1/users/1/alarms/active").await.json();
    assert_eq!(active.len(), 1);

    let details: Value = server
        .get(&format!("/api/v1/alarms/{alarm_id}/details"))
        .await
        .json();
    assert_eq!(details["id"].as_i64(), Some(alarm_id));
    assert_eq!(details["phone_number"]["number"], "+5511900000004");

    let first: Value = server
        .post(&format!("/api/v1/alarms/{alarm_id}/notified"))
        .await
        .json();
    assert_eq!(first["was_notified"], true);
    assert_eq!(first["is_active"], false);
    let second: Value = server
        .post(&format!("/api/v1/alarms/{alarm_id}/notified"))
        .await
        .json();
    assert_eq!(second["notified_at"], first["notified_at"]);

    let active: Vec<Value> = server.get("/api/v1/users/1/alarms/active").await.json();
    assert!(active.is_empty());

    server
        .post("/api/v1/alarms/9999/notified")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_notification_read_flags() {
    let server = test_server().await;
    for title in ["One", "Two"] {
        server
            .post("/api/v1/users/1/notifications")
            .json(&json!({ "type": "system", "title": title, "message": "hello" }))
            .await
            .assert_status_ok();
    }
    let unread: Vec<Value> = server
        .get("/api/v1/users/1/notifications/unread")
        .await
        .json();
    assert_eq!(unread.len(), 2);
    assert_eq!(unread[0]["type"], "system");

    let id = unread[0]["id"].as_i64().unwrap();
    let read: Value = server
        .post(&format!("/api/v1/notifications/{id}/read"))
        .await
        .json();
    assert_eq!(read, json!({ "success": true }));
    let unread: Vec<Value> = server
        .get("/api/v1/users/1/notifications/unread")
        .await
        .json();
    assert_eq!(unread.len(), 1);

    server
        .post("/api/v1/users/1/notifications/read-all")
        .await
        .assert_status_ok();
    let unread: Vec<Value> = server
        .get("/api/v1/users/1/notifications/unread")
        .await
        .json();
    assert!(unread.is_empty());
    let all: Vec<Value> = server
        .get("/api/v1/users/1/notifications?limit=1")
        .await
        .json();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_without_storage() {
    let server = server_with(ChipStore::unavailable());

    let numbers: Vec<Value> = server.get("/api/v1/users/1/phone-numbers").await.json();
    assert!(numbers.is_empty());

    let dashboard: Value = server.get("/api/v1/users/1/dashboard").await.json();
    assert_eq!(dashboard["total"], 0);

    let deleted: Value = server.delete("/api/v1/phone-numbers/1").await.json();
    assert_eq!(deleted, json!({ "success": false }));

    server
        .get("/api/v1/phone-numbers/1")
        .await
        .assert_status_not_found();

    let response = server
        .post("/api/v1/users/1/operations")
        .json(&json!({ "name": "Launch" }))
        .await;
    response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "server_error");
}
