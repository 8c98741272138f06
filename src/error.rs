//! Application error taxonomy and HTTP response mapping.
//!
//! Every failure a request can hit maps onto one [`AppError`] variant, and
//! every variant maps onto exactly one status code. All errors are terminal
//! for the current request — nothing in the service retries internally.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::store::StoreError;

/// JSON error envelope returned to clients.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error description embedded in error responses.
#[derive(Debug, Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

/// Application-level error taxonomy.
///
/// # Status mapping
///
/// | Variant | Status | Code |
/// |---|---|---|
/// | `Validation` | 400 | `validation_error` |
/// | `Unauthorized` | 401 | `unauthorized` |
/// | `DuplicateId` | 403 | `duplicate_id` |
/// | `NotFound` | 404 | `not_found` |
/// | `Internal` | 500 | `internal_error` |
/// | `QuotaExceeded` | 503 | `quota_exceeded` |
/// | `RejectedDomain` | 503 | `rejected_domain` |
///
#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    Unauthorized { message: String, details: Value },
    DuplicateId { message: String, details: Value },
    NotFound { message: String, details: Value },
    QuotaExceeded { message: String, details: Value },
    RejectedDomain { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn duplicate_id(message: impl Into<String>, details: Value) -> Self {
        Self::DuplicateId {
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
    pub fn quota_exceeded(message: impl Into<String>, details: Value) -> Self {
        Self::QuotaExceeded {
            message: message.into(),
            details,
        }
    }
    pub fn rejected_domain(message: impl Into<String>, details: Value) -> Self {
        Self::RejectedDomain {
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

    fn parts(self) -> (StatusCode, &'static str, String, Value) {
        match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::Unauthorized { message, details } => {
                (StatusCode::UNAUTHORIZED, "unauthorized", message, details)
            }
            AppError::DuplicateId { message, details } => {
                (StatusCode::FORBIDDEN, "duplicate_id", message, details)
            }
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::QuotaExceeded { message, details } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "quota_exceeded",
                message,
                details,
            ),
            AppError::RejectedDomain { message, details } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "rejected_domain",
                message,
                details,
            ),
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        }
    }

}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            AppError::Validation { message, .. }
            | AppError::Unauthorized { message, .. }
            | AppError::DuplicateId { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::QuotaExceeded { message, .. }
            | AppError::RejectedDomain { message, .. }
            | AppError::Internal { message, .. } => message,
        };
        write!(f, "{}", message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = self.parts();

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        tracing::error!(error = %e, "Store operation failed");
        AppError::internal("Key-value store error", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "Request validation failed",
            serde_json::to_value(&e).unwrap_or_else(|_| json!({})),
        )
    }
}
