//! HTTP API tests - requests go straight into the router, no socket

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use splitbill_ledger::MemoryStore;
use splitbill_rpc::api::{create_router, AppState};
use splitbill_rpc::{AppConfig, AppContext};
use tower::ServiceExt;

const CREATOR: &str = "0x1111111111111111111111111111111111111111";
const ALICE: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
const BOB: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

fn app() -> Router {
    let ctx = AppContext::with_store(AppConfig::default(), MemoryStore::new()).unwrap();
    create_router(AppState::from(&ctx))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(body.to_string())).unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create_dinner(app: &Router) -> String {
    let (status, bill) = send(
        app,
        Method::POST,
        "/api/bills",
        Some(json!({
            "title": "Dinner",
            "description": "Friday",
            "totalAmount": 90,
            "creator": CREATOR,
            "splitMethod": "equal",
            "participants": [
                { "address": ALICE, "name": "Alice" },
                { "address": BOB }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    bill["id"].as_str().unwrap().to_string()
}

async fn create_status(app: &Router, body: Value) -> (StatusCode, String) {
    let (status, body) = send(app, Method::POST, "/api/bills", Some(body)).await;
    let error = body["error"].as_str().unwrap_or_default().to_string();
    (status, error)
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_create_and_fetch_bill() {
    let app = app();
    let id = create_dinner(&app).await;

    let (status, bill) = send(&app, Method::GET, &format!("/api/bills/detail/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bill["title"], "Dinner");
    assert_eq!(bill["status"], "active");
    assert_eq!(bill["participants"][0]["share"], 30.0);
    assert_eq!(bill["participants"][1]["name"], BOB);

    let (status, bills) = send(&app, Method::GET, &format!("/api/bills/{}", ALICE), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bills.as_array().unwrap().len(), 1);

    let (_, bills) = send(&app, Method::GET, &format!("/api/bills/{}", CREATOR), None).await;
    assert_eq!(bills.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_custom_split_mismatch_is_bad_request() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/bills",
        Some(json!({
            "title": "Groceries",
            "totalAmount": 100,
            "creator": CREATOR,
            "splitMethod": "custom",
            "participants": [
                { "address": ALICE, "customAmount": 60 },
                { "address": BOB, "customAmount": 30 }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("add up"));
}

#[tokio::test]
async fn test_payment_flow_completes_bill() {
    let app = app();
    let id = create_dinner(&app).await;
    let uri = format!("/api/bills/{}/payment", id);

    let (status, bill) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "participantAddress": ALICE, "paymentReference": "0xtx1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bill["status"], "active");

    // Legacy field name for the reference
    let (status, bill) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "participantAddress": BOB.to_uppercase(), "txHash": "0xtx2" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bill["status"], "completed");
    assert_eq!(bill["participants"][1]["paymentReference"], "0xtx2");

    let (_, summary) = send(&app, Method::GET, &format!("/api/bills/{}/summary", BOB), None).await;
    assert_eq!(summary["totalBills"], 1);
    assert_eq!(summary["pendingPayments"], 0);
}

#[tokio::test]
async fn test_payment_unknown_participant_is_not_found() {
    let app = app();
    let id = create_dinner(&app).await;

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/bills/{}/payment", id),
        Some(json!({ "participantAddress": CREATOR, "paymentReference": "0xtx" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/bills/missing/payment",
        Some(json!({ "participantAddress": ALICE, "paymentReference": "0xtx" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_requires_creator() {
    let app = app();
    let id = create_dinner(&app).await;
    let uri = format!("/api/bills/{}", id);

    let (status, body) = send(
        &app,
        Method::DELETE,
        &uri,
        Some(json!({ "walletAddress": ALICE })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"].is_string());

    let (status, _) = send(
        &app,
        Method::DELETE,
        &uri,
        Some(json!({ "walletAddress": CREATOR })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, &format!("/api/bills/detail/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_missing_title_is_bad_request() {
    let app = app();
    let (status, error) = create_status(
        &app,
        json!({
            "totalAmount": 90,
            "creator": CREATOR,
            "participants": [{ "address": ALICE }]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error.starts_with("Invalid title or amount"), "{error}");
}

#[tokio::test]
async fn test_create_without_participants_is_bad_request() {
    let app = app();
    let (status, error) = create_status(
        &app,
        json!({ "title": "Dinner", "totalAmount": 90, "creator": CREATOR }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error, "Bill must have at least one participant");
}

#[tokio::test]
async fn test_create_invalid_address_is_bad_request() {
    let app = app();
    let (status, error) = create_status(
        &app,
        json!({
            "title": "Dinner",
            "totalAmount": 90,
            "creator": CREATOR,
            "participants": [{ "address": "0x1234" }]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error, "Invalid address: 0x1234");
}

#[tokio::test]
async fn test_create_amount_as_string() {
    let app = app();
    let (status, bill) = send(
        &app,
        Method::POST,
        "/api/bills",
        Some(json!({
            "title": "Dinner",
            "totalAmount": "90",
            "creator": CREATOR,
            "participants": [{ "address": ALICE }, { "address": BOB }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(bill["totalAmount"], 90.0);

    let (status, error) = create_status(
        &app,
        json!({
            "title": "Dinner",
            "totalAmount": null,
            "creator": CREATOR,
            "participants": [{ "address": ALICE }]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error.starts_with("Invalid title or amount"), "{error}");
}

#[tokio::test]
async fn test_unreadable_body_is_bad_request_json() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/bills")
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());

    // Wrong shape: participants must be a list
    let (status, error) = create_status(
        &app,
        json!({ "title": "Dinner", "totalAmount": 90, "creator": CREATOR, "participants": 3 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!error.is_empty());

    let id = create_dinner(&app).await;
    let (status, body) = send(&app, Method::DELETE, &format!("/api/bills/{}", id), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
