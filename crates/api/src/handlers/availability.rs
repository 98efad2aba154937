//! # Availability Handlers
//!
//! Both endpoints take `serviceId` and `date` (`YYYY-MM-DD`) query parameters
//! and return slots of the service's duration within the working window.
//!
//! - `/api/availability` drops slots that overlap appointments of the same
//!   service and returns the rest in chronological order.
//! - `/api/availability/smart` treats every service as one shared calendar:
//!   slots overlapping any appointment are dropped, and slots directly next to
//!   a booking of the same length are preferred. If at least one slot has
//!   such a neighbour, only those are returned, best score first; otherwise
//!   the plain list is returned without scores.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use slotbook_core::models::slot::{AvailabilityQuery, Slot};
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<AvailabilityQuery>, QueryRejection>,
) -> Result<Json<Vec<Slot>>, AppError> {
    let Query(query) = query?;
    let slots = state
        .engine
        .list_availability(query.service_id, query.date)
        .await?;
    Ok(Json(slots))
}

#[axum::debug_handler]
pub async fn get_smart_availability(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<AvailabilityQuery>, QueryRejection>,
) -> Result<Json<Vec<Slot>>, AppError> {
    let Query(query) = query?;
    let slots = state
        .engine
        .smart_availability(query.service_id, query.date)
        .await?;
    Ok(Json(slots))
}
