//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and error message.
///
/// # Error Categories
///
/// - **Database Errors**: Any sqlx::Error from database operations
/// - **Business Errors**: Lookup misses and ownership violations
/// - **Validation Errors**: Invalid request data
/// - **Conflicts**: Writes rejected by a uniqueness constraint
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A customer id or credit code matched nothing.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("{0}")]
    NotFound(String),

    /// The record exists but does not belong to the caller's customer.
    ///
    /// Kept apart from `NotFound`: this is a hit on someone else's record,
    /// not a miss. Returns HTTP 403 Forbidden.
    #[error("{0}")]
    AccessDenied(String),

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Invalid request")]
    InvalidRequest(String),

    /// A unique column (cpf, email, credit code) already holds the value.
    ///
    /// Returns HTTP 409 Conflict.
    #[error("{0}")]
    Conflict(String),
}

impl AppError {
    /// Classify an error raised by an INSERT or UPDATE.
    ///
    /// Unique violations become `Conflict`; everything else stays a `Database` error.
    pub fn from_write_error(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
                let message = match db_error.constraint() {
                    Some(constraint) => format!("Duplicate value violates {constraint}"),
                    None => "Duplicate value".to_string(),
                };
                AppError::Conflict(message)
            }
            _ => AppError::Database(error),
        }
    }

    /// Classify an error raised by a write that references a customer row.
    ///
    /// A foreign key violation means the customer is gone, reported the same
    /// way as a failed customer lookup.
    pub fn from_owned_write_error(error: sqlx::Error, customer_id: i64) -> Self {
        match &error {
            sqlx::Error::Database(db_error) if db_error.is_foreign_key_violation() => {
                AppError::NotFound(format!("Id {customer_id} not found"))
            }
            _ => Self::from_write_error(error),
        }
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `NotFound` → 404 Not Found
/// - `AccessDenied` → 403 Forbidden
/// - `InvalidRequest` → 400 Bad Request
/// - `Conflict` → 409 Conflict
/// - `Database` → 500 Internal Server Error (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::AccessDenied(ref msg) => {
                (StatusCode::FORBIDDEN, "access_denied", msg.clone())
            }
            AppError::InvalidRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            AppError::Conflict(ref msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            AppError::Database(ref err) => {
                tracing::error!(error = %err, "database operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
