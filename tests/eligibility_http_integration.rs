//! End-to-end tests for the eligibility endpoint.
//!
//! The real decider is wired through `EligibilityDecider::new`, talking to a
//! local stand-in for the App Store verifyReceipt endpoint and reading the
//! user store from a temporary file.

use std::io::Write;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Request, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tempfile::NamedTempFile;
use tokio::net::TcpListener;
use tower::ServiceExt;

use fractic_iap_eligibility::{
    config::{AppConfig, AppStoreConfig, ServerConfig, UserStoreConfig},
    decider::EligibilityDecider,
    http::{eligibility_router, ELIGIBILITY_PATH},
};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Receipts understood by the fake App Store, keyed by their base64 data.
fn app_store_reply(receipt_data: &str) -> Value {
    match receipt_data {
        // "empty"
        "ZW1wdHk=" => json!({ "status": 0, "receipt": { "in_app": [] } }),
        // "alice"
        "YWxpY2U=" => json!({
            "status": 0,
            "receipt": { "in_app": [
                { "original_transaction_id": "1000000001", "product_id": "premium_monthly" },
                { "original_transaction_id": "1000000002", "product_id": "premium_monthly" }
            ] }
        }),
        // "fresh"
        "ZnJlc2g=" => json!({
            "status": 0,
            "receipt": { "in_app": [{ "original_transaction_id": "1000000777" }] }
        }),
        // "sandbox"
        "c2FuZGJveA==" => json!({ "status": 21007 }),
        _ => json!({ "status": 21002 }),
    }
}

async fn spawn_app_store() -> String {
    let app = Router::new()
        .route(
            "/production",
            post(|Json(body): Json<Value>| async move {
                Json(app_store_reply(body["receipt-data"].as_str().unwrap_or_default()))
            }),
        )
        .route(
            "/sandbox",
            post(|| async {
                Json(json!({
                    "status": 0,
                    "environment": "Sandbox",
                    "receipt": { "in_app": [{ "original_transaction_id": "1000000001" }] }
                }))
            }),
        );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{}", addr)
}

struct TestApp {
    router: Router,
    _users: NamedTempFile,
}

async fn test_app() -> TestApp {
    let mut users = NamedTempFile::new().unwrap();
    write!(
        users,
        "{}",
        json!([
            { "username": "alice", "subscription": { "transactionId": "1000000001" } },
            { "username": "bob", "subscription": { "transactionId": "1000000003" } },
            { "username": "carol", "subscription": {} }
        ])
    )
    .unwrap();

    let base_url = spawn_app_store().await;
    let config = AppConfig {
        server: ServerConfig::default(),
        app_store: AppStoreConfig {
            production_url: format!("{}/production", base_url),
            sandbox_url: format!("{}/sandbox", base_url),
            ..Default::default()
        },
        user_store: UserStoreConfig {
            path: users.path().to_path_buf(),
        },
    };
    config.validate().unwrap();

    let decider = EligibilityDecider::new(&config).await.unwrap();
    TestApp {
        router: eligibility_router(Arc::new(decider)),
        _users: users,
    }
}

async fn check(app: &TestApp, username: &str, app_receipt: &str) -> Value {
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(ELIGIBILITY_PATH)
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "username": username, "app_receipt": app_receipt }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn empty_receipt_for_new_user_is_available() {
    let app = test_app().await;
    assert_eq!(
        check(&app, "dave", "ZW1wdHk=").await,
        json!({ "available": true, "reason": "noPurchaseInAppReceipt" })
    );
}

#[tokio::test]
async fn empty_receipt_for_subscribed_user_is_unavailable() {
    let app = test_app().await;
    assert_eq!(
        check(&app, "bob", "ZW1wdHk=").await,
        json!({ "available": false, "reason": "providedUsernameAlreadyLinkedToAnotherAppReceipt" })
    );
}

#[tokio::test]
async fn receipt_of_requesting_user_is_available() {
    let app = test_app().await;
    assert_eq!(
        check(&app, "alice", "YWxpY2U=").await,
        json!({ "available": true, "reason": "appReceiptLinkedToThisUser" })
    );
}

#[tokio::test]
async fn receipt_of_another_user_is_unavailable() {
    let app = test_app().await;
    assert_eq!(
        check(&app, "carol", "YWxpY2U=").await,
        json!({ "available": false, "reason": "appReceiptLinkedToAnotherUser" })
    );
}

#[tokio::test]
async fn unclaimed_receipt_is_available_to_unbound_user() {
    let app = test_app().await;
    assert_eq!(
        check(&app, "carol", "ZnJlc2g=").await,
        json!({ "available": true, "reason": "noUserLinkedToAppReceipt" })
    );
}

#[tokio::test]
async fn unclaimed_receipt_is_unavailable_to_bound_user() {
    let app = test_app().await;
    assert_eq!(
        check(&app, "bob", "ZnJlc2g=").await,
        json!({ "available": false, "reason": "providedUsernameAlreadyLinkedToAnotherAppReceipt" })
    );
}

#[tokio::test]
async fn sandbox_receipt_is_verified_against_sandbox() {
    let app = test_app().await;
    assert_eq!(
        check(&app, "alice", "c2FuZGJveA==").await,
        json!({ "available": true, "reason": "appReceiptLinkedToThisUser" })
    );
}

#[tokio::test]
async fn rejected_receipt_returns_app_store_error() {
    let app = test_app().await;
    let body = check(&app, "alice", "Z2FyYmFnZQ==").await;
    assert_eq!(body["error"]["status"], 21002);
    assert!(body["error"]["message"].as_str().unwrap().contains("malformed"));
}

#[tokio::test]
async fn non_base64_receipt_returns_error_without_status() {
    let app = test_app().await;
    let body = check(&app, "alice", "!!not a receipt!!").await;
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid app receipt"));
    assert!(body["error"].get("status").is_none());
}

#[tokio::test]
async fn identical_requests_give_identical_answers() {
    let app = test_app().await;
    let first = check(&app, "carol", "YWxpY2U=").await;
    let second = check(&app, "carol", "YWxpY2U=").await;
    assert_eq!(first, second);
}
