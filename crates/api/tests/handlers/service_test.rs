use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use slotbook_core::models::service::Service;

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_create_and_list_services() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/services")
        .json(&json!({ "name": "Consultation", "price": 100.0, "durationMinutes": 60 }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Service = response.json();
    assert_eq!(created.name, "Consultation");
    assert_eq!(created.price, dec!(100));
    assert_eq!(created.duration_minutes, 60);
    assert!(created.available);

    let listed: Vec<Service> = ctx.server.get("/api/services").await.json();
    assert_eq!(listed, vec![created]);
}

#[rstest]
#[case(json!({ "name": "", "price": 10, "durationMinutes": 30 }))]
#[case(json!({ "name": "Haircut", "price": -5, "durationMinutes": 30 }))]
#[case(json!({ "name": "Haircut", "price": 10, "durationMinutes": 0 }))]
#[case(json!({ "name": "Haircut", "price": 10 }))]
#[case(json!({ "name": "Haircut", "price": "cheap", "durationMinutes": 30 }))]
#[case(json!({ "name": "x".repeat(300), "price": 10, "durationMinutes": 30 }))]
#[case(json!({ "name": "Haircut", "price": 1e9, "durationMinutes": 30 }))]
#[case(json!({ "name": "Haircut", "price": 35.999, "durationMinutes": 30 }))]
#[case(json!({ "name": "Haircut", "price": 10, "durationMinutes": 1441 }))]
#[tokio::test]
async fn test_create_service_rejects_invalid_input(#[case] body: Value) {
    let ctx = TestContext::new();

    let response = ctx.server.post("/api/services").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let error: Value = response.json();
    assert_eq!(error["retryable"], json!(false));

    let listed: Vec<Service> = ctx.server.get("/api/services").await.json();
    assert!(listed.is_empty());
}
