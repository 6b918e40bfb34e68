//! Application error type and its HTTP representation.
//!
//! Every failure that reaches a handler is an [`AppError`]. The variant decides
//! the status code; the body always has the same shape:
//!
//! ```json
//! { "error": { "code": "conflict", "message": "Code already exists", "details": { "code": "promo24" } } }
//! ```

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error kind plus a human-readable message.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed URL, malformed code, or an unreadable request body.
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The requested code is already taken.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// Every generated code collided with an existing one.
    #[error("Failed to generate unique code after {attempts} attempts")]
    AllocationExhausted { attempts: usize },

    /// Store unavailable or any other unexpected failure.
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::AllocationExhausted { .. } | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Converts the error into the serializable `error` object of the response body.
    pub fn to_error_info(&self) -> ErrorInfo {
        let message = self.to_string();
        match self {
            Self::Validation { details, .. } => ErrorInfo {
                code: "validation_error",
                message,
                details: details.clone(),
            },
            Self::NotFound { details, .. } => ErrorInfo {
                code: "not_found",
                message,
                details: details.clone(),
            },
            Self::Conflict { details, .. } => ErrorInfo {
                code: "conflict",
                message,
                details: details.clone(),
            },
            Self::AllocationExhausted { attempts } => ErrorInfo {
                code: "allocation_exhausted",
                message,
                details: json!({ "attempts": attempts }),
            },
            Self::Internal { details, .. } => ErrorInfo {
                code: "internal_error",
                message,
                details: details.clone(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request".to_string());

        AppError::bad_request(message, serde_json::to_value(&errors).unwrap_or_default())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

/// Name of the unique constraint guarding `links.code`.
pub const CODE_UNIQUE_CONSTRAINT: &str = "links_code_key";

/// Maps a database error onto the application taxonomy.
///
/// A unique violation on [`CODE_UNIQUE_CONSTRAINT`] becomes [`AppError::Conflict`];
/// the allocator relies on this to retry generated codes.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        let constraint = db.constraint().map(str::to_string);
        if constraint.as_deref() == Some(CODE_UNIQUE_CONSTRAINT) {
            return AppError::conflict("Code already exists", json!({ "constraint": constraint }));
        }
        return AppError::conflict(
            "Unique constraint violation",
            json!({ "constraint": constraint }),
        );
    }

    let message = match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            "Database unavailable"
        }
        _ => "Database error",
    };
    tracing::error!(error = %e, "{}", message);

    AppError::internal(message, json!({}))
}
