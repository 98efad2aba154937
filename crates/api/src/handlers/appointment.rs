//! # Appointment Handlers
//!
//! Booking requests are validated once here (trimmed name, normalized email,
//! minute-aligned interval) and then handed to the engine, which re-checks the
//! slot against the store atomically with the insert.

use axum::{extract::{rejection::JsonRejection, State}, http::StatusCode, Json};
use slotbook_core::models::appointment::{Appointment, AppointmentDetails, CreateAppointmentRequest};
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

/// Lists every appointment, newest first, with the booked service's name
#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<AppointmentDetails>>, AppError> {
    let appointments = state.engine.list_appointments().await?;
    Ok(Json(appointments))
}

/// Books a slot for a customer
///
/// # Endpoint
///
/// ```text
/// POST /api/appointments
/// {"serviceId": "...", "customerName": "...", "customerEmail": "...",
///  "startTime": "2025-03-10T10:00:00Z", "endTime": "2025-03-10T10:30:00Z"}
/// ```
///
/// # Errors
///
/// * `400` - Malformed body, bad email, end not after start, or a length
///   different from the service duration
/// * `404` - Unknown service
/// * `409` - The slot overlaps an existing appointment of the service
/// * `503` - The store timed out or is unreachable; safe to retry
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateAppointmentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let Json(payload) = payload?;
    let request = payload.into_new_appointment()?;

    let appointment = state.engine.book_slot(request).await?;

    Ok((StatusCode::CREATED, Json(appointment)))
}
