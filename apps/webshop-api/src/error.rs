//! # API Error Types
//!
//! Every failure a handler can return, mapped onto a status code and a JSON
//! body `{ "code": "...", "message": "..." }`.
//!
//! ## Mapping
//! ```text
//! ┌──────────────────────────────┬──────────────────────────┬────────┐
//! │ Source                       │ Code                     │ Status │
//! ├──────────────────────────────┼──────────────────────────┼────────┤
//! │ Order/Customer/Product absent│ NOT_FOUND                │ 404    │
//! │ Bad input, unknown status    │ VALIDATION_ERROR         │ 400    │
//! │ Availability gate rejected   │ RESOURCE_UNAVAILABLE     │ 400    │
//! │ Rate fetch / parse failed    │ RATE_UNAVAILABLE         │ 502    │
//! │ Rate not positive            │ INVALID_RATE             │ 502    │
//! │ Unique / foreign key         │ CONFLICT                 │ 409    │
//! │ Other database failure       │ DATABASE_ERROR           │ 500    │
//! │ Anything else                │ INTERNAL                 │ 500    │
//! └──────────────────────────────┴──────────────────────────┴────────┘
//! ```
//!
//! Server-side failures are logged in full and reach the client only as a
//! generic message.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use webshop_core::{CoreError, ValidationError};
use webshop_db::DbError;
use webshop_rates::RateError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    ValidationError,
    ResourceUnavailable,
    RateUnavailable,
    InvalidRate,
    Conflict,
    DatabaseError,
    Internal,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError | ErrorCode::ResourceUnavailable => StatusCode::BAD_REQUEST,
            ErrorCode::RateUnavailable | ErrorCode::InvalidRate => StatusCode::BAD_GATEWAY,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::DatabaseError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error returned by every handler.
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
#[error("{code:?}: {message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::OrderNotFound(_)
            | CoreError::CustomerNotFound(_)
            | CoreError::ProductNotFound(_) => ErrorCode::NotFound,
            CoreError::ProductsUnavailable { .. } => ErrorCode::ResourceUnavailable,
            CoreError::InvalidRate(_) => ErrorCode::InvalidRate,
            CoreError::UnknownOrderStatus(_)
            | CoreError::AmountOverflow
            | CoreError::TooManyLineItems { .. }
            | CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => ApiError::not_found(err.to_string()),
            DbError::UniqueViolation { .. } | DbError::ForeignKeyViolation { .. } => {
                ApiError::new(ErrorCode::Conflict, err.to_string())
            }
            DbError::Domain(core) => core.into(),
            DbError::Internal(msg) => {
                error!(error = %msg, "Internal database error");
                ApiError::new(ErrorCode::Internal, "Internal error")
            }
            other => {
                error!(error = %other, "Database failure");
                ApiError::new(ErrorCode::DatabaseError, "Database error")
            }
        }
    }
}

impl From<RateError> for ApiError {
    fn from(err: RateError) -> Self {
        warn!(error = %err, "Exchange rate unavailable");
        let code = if err.is_invalid_rate() {
            ErrorCode::InvalidRate
        } else {
            ErrorCode::RateUnavailable
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}
