//! Handlers for user administration. Mounted behind
//! [`require_admin`](crate::api::middleware::auth::require_admin).

use axum::{Extension, extract::State};

use crate::api::dto::{DeleteRequest, IdQuery, UserAddRequest, UserQueryRequest, UserUpdateRequest};
use crate::api::extract::{ApiJson, ApiQuery};
use crate::api::middleware::auth::AdminUser;
use crate::api::response::{ApiResult, BaseResponse};
use crate::application::views::{AdminUserVo, Page, UserVo};
use crate::state::AppState;

/// Creates a user with the default password and returns the new id.
///
/// # Endpoint
///
/// `POST /user/add`
pub async fn add_user_handler(
    State(state): State<AppState>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
    ApiJson(req): ApiJson<UserAddRequest>,
) -> ApiResult<i64> {
    let id = state.user_service.add_user(req.into()).await?;
    tracing::info!(admin_id = admin.id, user_id = id, "admin added user");
    Ok(BaseResponse::success(id))
}

/// Full record by id, without the password hash.
///
/// # Endpoint
///
/// `GET /user/get?id={id}`
pub async fn get_user_handler(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<IdQuery>,
) -> ApiResult<AdminUserVo> {
    let user = state.user_service.get_by_id(query.id).await?;
    Ok(BaseResponse::success(AdminUserVo::from(&user)))
}

/// # Endpoint
///
/// `POST /user/delete`
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
    ApiJson(req): ApiJson<DeleteRequest>,
) -> ApiResult<bool> {
    let deleted = state.user_service.delete_by_id(req.id).await?;
    tracing::info!(admin_id = admin.id, user_id = req.id, "admin deleted user");
    Ok(BaseResponse::success(deleted))
}

/// # Endpoint
///
/// `POST /user/update`
pub async fn update_user_handler(
    State(state): State<AppState>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
    ApiJson(req): ApiJson<UserUpdateRequest>,
) -> ApiResult<bool> {
    let id = req.id;
    let updated = state.user_service.update_by_id(req.into()).await?;
    tracing::info!(admin_id = admin.id, user_id = id, "admin updated user");
    Ok(BaseResponse::success(updated))
}

/// Filtered, sorted page of public profiles.
///
/// # Endpoint
///
/// `POST /user/list/page/vo`
pub async fn list_user_vo_by_page_handler(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<UserQueryRequest>,
) -> ApiResult<Page<UserVo>> {
    let page = state.user_service.list_user_vo_by_page(req.into()).await?;
    Ok(BaseResponse::success(page))
}
