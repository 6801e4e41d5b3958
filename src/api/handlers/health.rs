//! Handler for the liveness endpoint.

use crate::api::response::{ApiResult, BaseResponse};

/// Reports that the process is serving requests. Does not touch the database.
///
/// # Endpoint
///
/// `GET /health/`
///
/// # Response
///
/// ```json
/// { "code": 0, "data": "ok", "message": "ok" }
/// ```
pub async fn health_handler() -> ApiResult<&'static str> {
    Ok(BaseResponse::success("ok"))
}
