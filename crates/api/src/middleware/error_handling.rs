//! # Error Handling Middleware
//!
//! This module provides a standardized way to handle errors in the
//! LessonSync API. It maps domain-specific errors to appropriate HTTP
//! status codes and JSON error responses, ensuring a consistent error
//! handling experience across the entire API.
//!
//! Error bodies carry both a human-readable `error` message and a stable
//! machine-readable `code`, so clients can branch on the failure kind
//! (full lesson vs. duplicate booking, for instance) without parsing text.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use lessonsync_core::errors::StudioError;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps domain-specific `StudioError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
#[derive(Debug)]
pub struct AppError(pub StudioError);

/// Converts application errors to HTTP responses
///
/// This implementation maps each error type to the appropriate HTTP status
/// code and formats the error message and code into a JSON response body.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            StudioError::NotFound(_) => StatusCode::NOT_FOUND,
            StudioError::NoReservationToday => StatusCode::NOT_FOUND,
            StudioError::Validation(_) => StatusCode::BAD_REQUEST,
            StudioError::NotBookable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            StudioError::WindowClosed => StatusCode::UNPROCESSABLE_ENTITY,
            StudioError::AlreadyReserved => StatusCode::CONFLICT,
            StudioError::LessonFull => StatusCode::CONFLICT,
            StudioError::AlreadyCheckedIn => StatusCode::CONFLICT,
            StudioError::Feed(_) => StatusCode::BAD_GATEWAY,
            StudioError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            StudioError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Get the error message and format as JSON
        let body = Json(json!({
            "error": self.0.to_string(),
            "code": self.0.code(),
        }));

        // Combine status code and JSON body into a response
        (status, body).into_response()
    }
}

/// Automatic conversion from StudioError to AppError
///
/// This implementation allows using `?` operator with functions that return
/// `Result<T, StudioError>` in handler functions that return
/// `Result<T, AppError>`.
impl From<StudioError> for AppError {
    fn from(err: StudioError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError
///
/// This implementation allows using `?` operator with functions that return
/// `Result<T, eyre::Report>` in handler functions that return
/// `Result<T, AppError>`. It wraps the eyre error in a
/// `StudioError::Database` variant.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(StudioError::Database(err))
    }
}
