//! Cross-origin policy.

use axum::http::{
    HeaderName, Method,
    header::{
        ACCEPT, ACCEPT_ENCODING, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN,
        AUTHORIZATION, CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE, ORIGIN,
    },
};
use tower_http::cors::{AllowOrigin, CorsLayer};

const X_CSRF_TOKEN: HeaderName = HeaderName::from_static("x-csrf-token");
const X_REQUESTED_WITH: HeaderName = HeaderName::from_static("x-requested-with");

/// Permissive CORS: echoes the caller's origin and allows credentials.
///
/// Preflight requests are answered by the layer itself.
pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([
            Method::POST,
            Method::OPTIONS,
            Method::GET,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_headers([
            CONTENT_TYPE,
            CONTENT_LENGTH,
            ACCEPT_ENCODING,
            X_CSRF_TOKEN,
            AUTHORIZATION,
            ACCEPT,
            ORIGIN,
            CACHE_CONTROL,
            X_REQUESTED_WITH,
        ])
        .expose_headers([
            CONTENT_LENGTH,
            ACCESS_CONTROL_ALLOW_ORIGIN,
            ACCESS_CONTROL_ALLOW_HEADERS,
            CONTENT_TYPE,
        ])
}
