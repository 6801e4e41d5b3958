//! Application error type and the business error code table.
//!
//! Every failure leaves the service as an HTTP 200 response carrying the
//! `{code, data, message}` envelope (see [`crate::api::response`]). Business
//! failures keep their own message; system failures are logged and collapsed
//! into a generic [`ErrorCode::SystemError`] so internals never reach clients.

use axum::response::{IntoResponse, Response};
use heck::ToLowerCamelCase;
use thiserror::Error;
use validator::ValidationErrors;

use crate::api::response::BaseResponse;

/// Stable numeric codes shared with clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success,
    ParamsError,
    NotLoginError,
    NoAuthError,
    ForbiddenError,
    NotFoundError,
    TooManyRequest,
    SystemError,
    OperationError,
}

impl ErrorCode {
    pub const fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::ParamsError => 40000,
            Self::NotLoginError => 40100,
            Self::NoAuthError => 40101,
            Self::ForbiddenError => 40300,
            Self::NotFoundError => 40400,
            Self::TooManyRequest => 42900,
            Self::SystemError => 50000,
            Self::OperationError => 50001,
        }
    }

    /// Default message sent when a failure carries no message of its own.
    pub const fn message(self) -> &'static str {
        match self {
            Self::Success => "ok",
            Self::ParamsError => "Invalid request parameters",
            Self::NotLoginError => "Not logged in",
            Self::NoAuthError => "No permission",
            Self::ForbiddenError => "Access forbidden",
            Self::NotFoundError => "Requested data not found",
            Self::TooManyRequest => "Too many requests",
            Self::SystemError => "Internal system error",
            Self::OperationError => "Operation failed",
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Expected failure reported to the client as-is.
    #[error("{message} (code {})", code.code())]
    Business { code: ErrorCode, message: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Business error carrying the code's default message.
    pub fn business(code: ErrorCode) -> Self {
        Self::Business {
            code,
            message: code.message().to_string(),
        }
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Business {
            code,
            message: message.into(),
        }
    }

    pub fn params(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ParamsError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Code reported to the client for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Business { code, .. } => *code,
            Self::Database(_) | Self::Internal(_) => ErrorCode::SystemError,
        }
    }
}

/// Returns `Err` with the given business error unless `condition` holds.
///
/// # Errors
///
/// Returns [`AppError::Business`] built from `code` and `message` when
/// `condition` is false.
pub fn ensure(condition: bool, code: ErrorCode, message: &str) -> Result<(), AppError> {
    if condition {
        Ok(())
    } else {
        Err(AppError::with_message(code, message))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_lower_camel_case())
            .collect();
        fields.sort_unstable();
        Self::params(format!("Invalid request parameters: {}", fields.join(", ")))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::Business { code, message } => {
                tracing::debug!(code = code.code(), %message, "business error");
                BaseResponse::<()>::failure(code, message).into_response()
            }
            Self::Database(e) => {
                tracing::error!(error = %e, "database error");
                BaseResponse::<()>::error(ErrorCode::SystemError).into_response()
            }
            Self::Internal(message) => {
                tracing::error!(%message, "internal error");
                BaseResponse::<()>::error(ErrorCode::SystemError).into_response()
            }
        }
    }
}
