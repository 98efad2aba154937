use axum::{extract::{rejection::JsonRejection, State}, http::StatusCode, Json};
use slotbook_core::models::service::{CreateServiceRequest, Service};
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn list_services(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Service>>, AppError> {
    let services = state.engine.list_services().await?;
    Ok(Json(services))
}

#[axum::debug_handler]
pub async fn create_service(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateServiceRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Service>), AppError> {
    let Json(payload) = payload?;
    let new_service = payload.into_new_service()?;

    let service = state.engine.create_service(new_service).await?;

    Ok((StatusCode::CREATED, Json(service)))
}
