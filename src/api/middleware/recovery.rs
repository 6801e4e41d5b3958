//! Turns handler panics into the system error envelope.

use std::any::Any;

use axum::response::{IntoResponse, Response};
use tower_http::catch_panic::CatchPanicLayer;

use crate::api::response::BaseResponse;
use crate::error::ErrorCode;

type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

pub fn layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(handle_panic as PanicHandler)
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else {
        "non-string panic payload"
    };

    tracing::error!(panic = %detail, "request handler panicked");
    BaseResponse::<()>::error(ErrorCode::SystemError).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, body::to_bytes, http::Request, http::StatusCode, routing::get};
    use tower::ServiceExt;

    async fn boom() -> &'static str {
        panic!("handler exploded")
    }

    #[tokio::test]
    async fn panic_becomes_system_error_envelope() {
        let app = Router::new().route("/boom", get(boom)).layer(layer());

        let response = app
            .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], 50000);
        assert_eq!(body["message"], "Internal system error");
    }
}
