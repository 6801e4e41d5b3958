//! Bearer token session extraction and admin authorization.

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::application::services::Claims;
use crate::domain::entities::User;
use crate::error::{AppError, ErrorCode};
use crate::state::AppState;

/// Verified session claims of the caller.
///
/// Rejects with [`ErrorCode::NotLoginError`] when the `Authorization: Bearer`
/// header is missing or the token is invalid, expired or revoked.
#[derive(Debug, Clone)]
pub struct LoginToken(pub Claims);

impl FromRequestParts<AppState> for LoginToken {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthBearer(token) = AuthBearer::from_request_parts(parts, &())
            .await
            .map_err(|_| AppError::business(ErrorCode::NotLoginError))?;

        state.auth_service.verify(&token).map(Self)
    }
}

/// Like [`LoginToken`] but never rejects; `None` when there is no valid session.
#[derive(Debug, Clone)]
pub struct MaybeLoginToken(pub Option<Claims>);

impl FromRequestParts<AppState> for MaybeLoginToken {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(
            LoginToken::from_request_parts(parts, state)
                .await
                .ok()
                .map(|LoginToken(claims)| claims),
        ))
    }
}

/// The administrator performing the request, inserted by [`require_admin`].
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

/// Lets a request through only for a logged-in administrator.
///
/// The role is read from storage, not from the token, so demoted or deleted
/// accounts lose access immediately.
///
/// # Errors
///
/// Returns [`ErrorCode::NotLoginError`] without a valid session and
/// [`ErrorCode::NoAuthError`] when the user is not an administrator.
///
/// # Example
///
/// ```rust,ignore
/// let admin = Router::new()
///     .route("/add", post(add_user_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_admin));
/// ```
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    let LoginToken(claims) = LoginToken::from_request_parts(&mut parts, &state).await?;

    let user = state.user_service.get_login_user(&claims).await?;
    if !user.is_admin() {
        tracing::warn!(user_id = user.id, "non-admin attempted an admin operation");
        return Err(AppError::business(ErrorCode::NoAuthError));
    }

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(AdminUser(user));

    Ok(next.run(req).await)
}
