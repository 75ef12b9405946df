//! # Error Handling Middleware
//!
//! Maps domain-specific `BookingError` values to HTTP status codes and JSON
//! error responses so every endpoint fails the same way.
//!
//! The mapping keeps the domain's error taxonomy visible to clients:
//! configuration errors (broken schedules, zero-duration services) are 422s
//! the business owner must fix, while upstream fetch failures are 503s the
//! caller may retry with backoff. An empty slot list is never an error and
//! never reaches this module.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use slotwise_core::errors::BookingError;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps domain-specific `BookingError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
#[derive(Debug)]
pub struct AppError(pub BookingError);

/// Converts application errors to HTTP responses
///
/// This implementation maps each error type to the appropriate HTTP status code
/// and formats the error message into a JSON response body.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::InvalidScheduleConfiguration(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BookingError::InvalidServiceDefinition(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BookingError::UpstreamDataUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            BookingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Get the error message and format as JSON
        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        // Combine status code and JSON body into a response
        (status, body).into_response()
    }
}

/// Automatic conversion from BookingError to AppError
///
/// This implementation allows using `?` operator with functions that return
/// `Result<T, BookingError>` in handler functions that return `Result<T, AppError>`.
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError
///
/// Repository functions return `eyre::Result`; a failed fetch is an upstream
/// availability problem, not a configuration one.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(BookingError::UpstreamDataUnavailable(err))
    }
}
