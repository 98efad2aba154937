//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and JSON error bodies, so every
//! rejected request tells the caller whether it was bad input, a missing
//! service, a taken slot, or an infrastructure failure worth retrying.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use slotbook_core::errors::BookingError;

/// Seconds a client should wait before retrying after a store failure
const RETRY_AFTER_SECONDS: &str = "1";

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps `BookingError` and implements `IntoResponse`, which lets
/// handlers use `?` on engine calls directly.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use slotbook_api::middleware::error_handling::AppError;
/// use slotbook_core::errors::BookingError;
///
/// async fn handler(name: String) -> Result<Json<String>, AppError> {
///     if name.is_empty() {
///         return Err(BookingError::InvalidInput("name is required".into()).into());
///     }
///     Ok(Json(name))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            BookingError::SlotUnavailable(_) => StatusCode::CONFLICT,
            BookingError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let retryable = self.0.is_retryable();

        if retryable {
            tracing::error!("Store failure while handling request: {:?}", self.0);
        }

        let body = Json(json!({
            "error": self.0.to_string(),
            "retryable": retryable,
        }));

        if retryable {
            (status, [(header::RETRY_AFTER, RETRY_AFTER_SECONDS)], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

/// Malformed JSON bodies are input errors
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(BookingError::InvalidInput(rejection.body_text()))
    }
}

/// Missing or unparsable query parameters are input errors
impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError(BookingError::InvalidInput(rejection.body_text()))
    }
}

/// Maps a BookingError to an HTTP response
pub fn map_error(err: BookingError) -> Response {
    AppError(err).into_response()
}
