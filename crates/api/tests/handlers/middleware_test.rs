use std::sync::Arc;

use axum::http::{header, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use slotbook_api::middleware::error_handling::map_error;
use slotbook_core::errors::BookingError;
use slotbook_db::mock::repositories::MockStore;

use crate::test_utils::{booking_body, TestContext};

#[tokio::test]
async fn test_error_handling_not_found() {
    let response = map_error(BookingError::NotFound("Service not found".to_string()));
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_error_handling_invalid_input() {
    let response = map_error(BookingError::InvalidInput("Invalid input".to_string()));
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_handling_slot_unavailable() {
    let response = map_error(BookingError::SlotUnavailable("Taken".to_string()));
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(response.headers().get(header::RETRY_AFTER).is_none());
}

#[tokio::test]
async fn test_error_handling_store_unavailable() {
    let response = map_error(BookingError::StoreUnavailable(eyre::eyre!("Database error")));
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(response.headers().get(header::RETRY_AFTER).is_some());
}

#[tokio::test]
async fn test_store_outage_is_retryable_over_http() {
    let mut store = MockStore::new();
    store
        .expect_find_service()
        .returning(|_| Err(BookingError::StoreUnavailable(eyre::eyre!("connection reset"))));
    store
        .expect_list_services()
        .returning(|| Err(BookingError::StoreUnavailable(eyre::eyre!("connection reset"))));
    store.expect_create_appointment().times(0);

    let ctx = TestContext::with_store(Arc::new(store));

    let response = ctx
        .server
        .post("/api/appointments")
        .json(&booking_body(uuid::Uuid::new_v4(), "10:00", "10:30"))
        .await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["retryable"], json!(true));

    ctx.server
        .get("/health/ready")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new();

    let body: Value = ctx.server.get("/health").await.json();
    assert_eq!(body["status"], json!("ok"));

    let body: Value = ctx.server.get("/health/ready").await.json();
    assert_eq!(body["status"], json!("ready"));
}
