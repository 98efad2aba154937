use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/availability",
            get(handlers::availability::get_availability),
        )
        .route(
            "/api/availability/smart",
            get(handlers::availability::get_smart_availability),
        )
}
