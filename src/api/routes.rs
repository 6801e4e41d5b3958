//! API route configuration.

use crate::api::handlers::{
    add_user_handler, delete_user_handler, get_login_user_handler, get_user_handler,
    get_user_vo_handler, health_handler, list_user_vo_by_page_handler, login_handler,
    logout_handler, register_handler, update_user_handler,
};
use crate::api::middleware::auth;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Account and administration routes, mounted under `/user`.
///
/// # Endpoints
///
/// Public or session-bound:
///
/// - `POST /register`       - Create an account
/// - `POST /login`          - Obtain a bearer token
/// - `GET  /get/login`      - Current user (bearer token)
/// - `POST /logout`         - Revoke the bearer token
/// - `GET  /get/vo?id=`     - Public profile
///
/// Administrator only (see [`auth::require_admin`]):
///
/// - `POST /add`            - Create a user with the default password
/// - `GET  /get?id=`        - Full record
/// - `POST /delete`         - Soft-delete
/// - `POST /update`         - Edit profile and role
/// - `POST /list/page/vo`   - Filtered, paginated listing
pub fn user_routes(state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/add", post(add_user_handler))
        .route("/get", get(get_user_handler))
        .route("/delete", post(delete_user_handler))
        .route("/update", post(update_user_handler))
        .route("/list/page/vo", post(list_user_vo_by_page_handler))
        .route_layer(middleware::from_fn_with_state(state, auth::require_admin));

    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/get/login", get(get_login_user_handler))
        .route("/logout", post(logout_handler))
        .route("/get/vo", get(get_user_vo_handler))
        .merge(admin)
}

/// `GET /` liveness probe, mounted under `/health`.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_handler))
}
