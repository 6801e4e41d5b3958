//! Request bodies for the `/user` endpoints.
//!
//! Fields that the business rules check themselves (lengths, matching
//! passwords) are only required to be present here, so clients get the
//! specific message from the service.

use serde::Deserialize;
use validator::Validate;

use crate::api::dto::PageRequest;
use crate::application::services::{AddUserInput, ListUsersInput, UpdateUserInput};

/// Body of `POST /user/register`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserRegisterRequest {
    #[validate(length(max = 256))]
    pub user_account: String,
    #[validate(length(max = 128))]
    pub user_password: String,
    #[validate(length(max = 128))]
    pub check_password: String,
}

/// Body of `POST /user/login`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserLoginRequest {
    #[validate(length(max = 256))]
    pub user_account: String,
    #[validate(length(max = 128))]
    pub user_password: String,
}

/// Body of `POST /user/add`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserAddRequest {
    #[validate(length(min = 1, max = 256, message = "userAccount is required"))]
    pub user_account: String,
    #[validate(length(max = 256))]
    pub user_name: Option<String>,
    #[validate(length(max = 1024))]
    pub user_avatar: Option<String>,
    #[validate(length(max = 512))]
    pub user_profile: Option<String>,
    pub user_role: Option<String>,
}

impl From<UserAddRequest> for AddUserInput {
    fn from(req: UserAddRequest) -> Self {
        Self {
            user_account: req.user_account,
            user_name: req.user_name,
            user_avatar: req.user_avatar,
            user_profile: req.user_profile,
            user_role: req.user_role,
        }
    }
}

/// Body of `POST /user/update`. Omitted or empty fields stay unchanged.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateRequest {
    #[serde(default)]
    #[validate(range(min = 1, message = "id must be positive"))]
    pub id: i64,
    #[validate(length(max = 256))]
    pub user_name: Option<String>,
    #[validate(length(max = 1024))]
    pub user_avatar: Option<String>,
    #[validate(length(max = 512))]
    pub user_profile: Option<String>,
    pub user_role: Option<String>,
}

impl From<UserUpdateRequest> for UpdateUserInput {
    fn from(req: UserUpdateRequest) -> Self {
        Self {
            id: req.id,
            user_name: req.user_name,
            user_avatar: req.user_avatar,
            user_profile: req.user_profile,
            user_role: req.user_role,
        }
    }
}

/// Body of `POST /user/list/page/vo`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserQueryRequest {
    #[serde(flatten)]
    pub page: PageRequest,
    pub id: Option<i64>,
    pub user_account: Option<String>,
    pub user_name: Option<String>,
    pub user_profile: Option<String>,
    pub user_role: Option<String>,
}

impl From<UserQueryRequest> for ListUsersInput {
    fn from(req: UserQueryRequest) -> Self {
        Self {
            page_num: req.page.page_num,
            page_size: req.page.page_size,
            sort_field: req.page.sort_field,
            sort_order: req.page.sort_order,
            id: req.id,
            user_account: req.user_account,
            user_name: req.user_name,
            user_profile: req.user_profile,
            user_role: req.user_role,
        }
    }
}
