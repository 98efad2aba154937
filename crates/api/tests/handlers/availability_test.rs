use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;
use slotbook_core::models::slot::Slot;
use uuid::Uuid;

use crate::test_utils::{at, booking_body, TestContext, DATE};

async fn availability(ctx: &TestContext, path: &str, service_id: Uuid) -> Vec<Slot> {
    let response = ctx
        .server
        .get(path)
        .add_query_param("serviceId", service_id)
        .add_query_param("date", DATE)
        .await;
    response.assert_status_ok();
    response.json()
}

#[tokio::test]
async fn test_plain_availability_excludes_booked_slot() {
    let ctx = TestContext::new();
    let service = ctx.seed_service("Haircut", 30).await;

    let slots = availability(&ctx, "/api/availability", service.id).await;
    assert_eq!(slots.len(), 16);

    ctx.server
        .post("/api/appointments")
        .json(&booking_body(service.id, "10:00", "10:30"))
        .await
        .assert_status(StatusCode::CREATED);

    let slots = availability(&ctx, "/api/availability", service.id).await;
    assert_eq!(slots.len(), 15);
    assert!(slots.iter().all(|s| s.start_time.to_rfc3339() != "2025-03-10T10:00:00+00:00"));
}

#[tokio::test]
async fn test_smart_availability_returns_adjacent_slots_only() {
    let ctx = TestContext::new();
    let service = ctx.seed_service("Haircut", 30).await;

    ctx.server
        .post("/api/appointments")
        .json(&booking_body(service.id, "09:30", "10:00"))
        .await
        .assert_status(StatusCode::CREATED);

    let response = ctx
        .server
        .get("/api/availability/smart")
        .add_query_param("serviceId", service.id)
        .add_query_param("date", DATE)
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(
        body,
        serde_json::json!([
            { "startTime": at("09:00"), "endTime": at("09:30"), "duration": 30, "score": 1 },
            { "startTime": at("10:00"), "endTime": at("10:30"), "duration": 30, "score": 1 },
        ])
    );
}

#[tokio::test]
async fn test_smart_availability_falls_back_without_scores() {
    let ctx = TestContext::new();
    let service = ctx.seed_service("Massage", 45).await;

    let slots = availability(&ctx, "/api/availability/smart", service.id).await;

    assert_eq!(slots.len(), 10);
    assert!(slots.iter().all(|s| s.score.is_none()));
}

#[tokio::test]
async fn test_unknown_service_is_not_found() {
    let ctx = TestContext::new();

    for path in ["/api/availability", "/api/availability/smart"] {
        ctx.server
            .get(path)
            .add_query_param("serviceId", Uuid::new_v4())
            .add_query_param("date", DATE)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_invalid_query_is_bad_request() {
    let ctx = TestContext::new();
    let service = ctx.seed_service("Haircut", 30).await;

    ctx.server
        .get("/api/availability")
        .add_query_param("serviceId", "not-a-uuid")
        .add_query_param("date", DATE)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    ctx.server
        .get("/api/availability")
        .add_query_param("serviceId", service.id)
        .add_query_param("date", "10/03/2025")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    ctx.server
        .get("/api/availability")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_far_future_date_is_bad_request() {
    let ctx = TestContext::new();
    let service = ctx.seed_service("Haircut", 30).await;

    for path in ["/api/availability", "/api/availability/smart"] {
        let response = ctx
            .server
            .get(path)
            .add_query_param("serviceId", service.id)
            .add_query_param("date", "+262142-12-31")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let error: Value = response.json();
        assert_eq!(error["retryable"], serde_json::json!(false));
    }
}
