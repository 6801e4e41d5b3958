//! Handlers for account endpoints available to every caller.

use axum::extract::State;

use crate::api::dto::{IdQuery, UserLoginRequest, UserRegisterRequest};
use crate::api::extract::{ApiJson, ApiQuery};
use crate::api::middleware::auth::{LoginToken, MaybeLoginToken};
use crate::api::response::{ApiResult, BaseResponse};
use crate::application::views::{LoginUserVo, UserVo};
use crate::state::AppState;

/// Registers an account and returns its id.
///
/// # Endpoint
///
/// `POST /user/register`
pub async fn register_handler(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<UserRegisterRequest>,
) -> ApiResult<i64> {
    let id = state
        .user_service
        .register(&req.user_account, &req.user_password, &req.check_password)
        .await?;

    Ok(BaseResponse::success(id))
}

/// Logs in and returns the user view with a bearer token.
///
/// # Endpoint
///
/// `POST /user/login`
pub async fn login_handler(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<UserLoginRequest>,
) -> ApiResult<LoginUserVo> {
    let vo = state
        .user_service
        .login(&req.user_account, &req.user_password)
        .await?;

    Ok(BaseResponse::success(vo))
}

/// # Endpoint
///
/// `GET /user/get/login`
pub async fn get_login_user_handler(
    State(state): State<AppState>,
    LoginToken(claims): LoginToken,
) -> ApiResult<LoginUserVo> {
    let user = state.user_service.get_login_user(&claims).await?;
    Ok(BaseResponse::success(LoginUserVo::from(&user)))
}

/// Revokes the caller's token.
///
/// # Endpoint
///
/// `POST /user/logout`
pub async fn logout_handler(
    State(state): State<AppState>,
    MaybeLoginToken(claims): MaybeLoginToken,
) -> ApiResult<bool> {
    let done = state.user_service.logout(claims.as_ref())?;
    Ok(BaseResponse::success(done))
}

/// Public profile by id.
///
/// # Endpoint
///
/// `GET /user/get/vo?id={id}`
pub async fn get_user_vo_handler(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<IdQuery>,
) -> ApiResult<UserVo> {
    let user = state.user_service.get_by_id(query.id).await?;
    Ok(BaseResponse::success(UserVo::from(&user)))
}
