use std::future::IntoFuture;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use slotbook_core::models::appointment::{Appointment, AppointmentDetails};
use uuid::Uuid;

use crate::test_utils::{at, booking_body, TestContext};

#[tokio::test]
async fn test_book_slot_returns_created_appointment() {
    let ctx = TestContext::new();
    let service = ctx.seed_service("Haircut", 30).await;

    let mut body = booking_body(service.id, "10:00", "10:30");
    body["customerEmail"] = json!("  Ada@Example.com ");
    // Sub-minute jitter is dropped
    body["startTime"] = json!("2025-03-10T10:00:17.250Z");
    body["endTime"] = json!("2025-03-10T10:30:17.250Z");

    let response = ctx.server.post("/api/appointments").json(&body).await;
    response.assert_status(StatusCode::CREATED);

    let appointment: Appointment = response.json();
    assert_eq!(appointment.service_id, service.id);
    assert_eq!(appointment.customer_email, "ada@example.com");
    assert_eq!(appointment.start_time.to_rfc3339(), "2025-03-10T10:00:00+00:00");
    assert_eq!(appointment.end_time.to_rfc3339(), "2025-03-10T10:30:00+00:00");
}

#[tokio::test]
async fn test_double_booking_is_a_conflict() {
    let ctx = TestContext::new();
    let service = ctx.seed_service("Haircut", 30).await;

    ctx.server
        .post("/api/appointments")
        .json(&booking_body(service.id, "10:00", "10:30"))
        .await
        .assert_status(StatusCode::CREATED);

    let response = ctx
        .server
        .post("/api/appointments")
        .json(&booking_body(service.id, "10:00", "10:30"))
        .await;
    response.assert_status(StatusCode::CONFLICT);

    let error: Value = response.json();
    assert!(error["error"].as_str().unwrap().contains("already booked"));
    assert_eq!(error["retryable"], json!(false));
}

#[tokio::test]
async fn test_concurrent_identical_requests_book_once() {
    let ctx = TestContext::new();
    let service = ctx.seed_service("Haircut", 30).await;

    let first_body = booking_body(service.id, "15:00", "15:30");
    let second_body = booking_body(service.id, "15:00", "15:30");
    let first = ctx.server.post("/api/appointments").json(&first_body).into_future();
    let second = ctx.server.post("/api/appointments").json(&second_body).into_future();
    let (first, second) = tokio::join!(first, second);

    let mut statuses = vec![first.status_code().as_u16(), second.status_code().as_u16()];
    statuses.sort();
    assert_eq!(statuses, vec![201, 409]);
}

#[tokio::test]
async fn test_booking_rejections_are_distinguishable() {
    let ctx = TestContext::new();
    let service = ctx.seed_service("Haircut", 30).await;

    // End before start
    ctx.server
        .post("/api/appointments")
        .json(&booking_body(service.id, "10:30", "10:00"))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // Wrong length for the service
    ctx.server
        .post("/api/appointments")
        .json(&booking_body(service.id, "10:00", "11:00"))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // Bad email
    let mut body = booking_body(service.id, "10:00", "10:30");
    body["customerEmail"] = json!("not-an-email");
    ctx.server
        .post("/api/appointments")
        .json(&body)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // Missing field
    ctx.server
        .post("/api/appointments")
        .json(&json!({ "serviceId": service.id, "startTime": at("10:00") }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // Unknown service
    ctx.server
        .post("/api/appointments")
        .json(&booking_body(Uuid::new_v4(), "10:00", "10:30"))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let listed: Vec<AppointmentDetails> = ctx.server.get("/api/appointments").await.json();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_list_appointments_includes_service_name() {
    let ctx = TestContext::new();
    let haircut = ctx.seed_service("Haircut", 30).await;
    let consultation = ctx.seed_service("Consultation", 60).await;

    ctx.server
        .post("/api/appointments")
        .json(&booking_body(haircut.id, "09:00", "09:30"))
        .await
        .assert_status(StatusCode::CREATED);
    ctx.server
        .post("/api/appointments")
        .json(&booking_body(consultation.id, "13:00", "14:00"))
        .await
        .assert_status(StatusCode::CREATED);

    let body: Value = ctx.server.get("/api/appointments").await.json();
    let mut names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["serviceName"].as_str().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Consultation", "Haircut"]);
}
