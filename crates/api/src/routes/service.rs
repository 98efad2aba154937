use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/api/services",
        get(handlers::service::list_services).post(handlers::service::create_service),
    )
}
