//! Uniform `{code, data, message}` response envelope.

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::{AppError, ErrorCode};

/// Envelope wrapping every API payload. Always sent with HTTP 200.
#[derive(Debug, Serialize)]
pub struct BaseResponse<T> {
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub message: String,
}

impl<T> BaseResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: ErrorCode::Success.code(),
            data: Some(data),
            message: ErrorCode::Success.message().to_string(),
        }
    }

    /// Failure with the code's default message.
    pub fn error(code: ErrorCode) -> Self {
        Self::failure(code, code.message())
    }

    pub fn failure(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            data: None,
            message: message.into(),
        }
    }
}

impl<T: Serialize> IntoResponse for BaseResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Return type of every JSON handler.
pub type ApiResult<T> = Result<BaseResponse<T>, AppError>;
