//! Sanitized user representations returned to clients.
//!
//! None of these types carry the password hash.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::services::auth_service::IssuedToken;
use crate::domain::entities::{User, UserRole};

/// Public profile of a user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserVo {
    pub id: i64,
    pub user_account: String,
    pub user_name: String,
    pub user_avatar: String,
    pub user_profile: String,
    pub user_role: UserRole,
    pub create_time: DateTime<Utc>,
}

impl From<&User> for UserVo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            user_account: user.user_account.clone(),
            user_name: user.user_name.clone(),
            user_avatar: user.user_avatar.clone(),
            user_profile: user.user_profile.clone(),
            user_role: user.user_role,
            create_time: user.create_time,
        }
    }
}

/// The logged-in user's own view. Carries the session token right after login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUserVo {
    pub id: i64,
    pub user_account: String,
    pub user_name: String,
    pub user_avatar: String,
    pub user_profile: String,
    pub user_role: UserRole,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_expire_time: Option<DateTime<Utc>>,
}

impl LoginUserVo {
    pub fn with_token(mut self, issued: IssuedToken) -> Self {
        self.token = Some(issued.token);
        self.token_expire_time = Some(issued.expires_at);
        self
    }
}

impl From<&User> for LoginUserVo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            user_account: user.user_account.clone(),
            user_name: user.user_name.clone(),
            user_avatar: user.user_avatar.clone(),
            user_profile: user.user_profile.clone(),
            user_role: user.user_role,
            create_time: user.create_time,
            update_time: user.update_time,
            token: None,
            token_expire_time: None,
        }
    }
}

/// Full record as seen by administrators.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserVo {
    pub id: i64,
    pub user_account: String,
    pub user_name: String,
    pub user_avatar: String,
    pub user_profile: String,
    pub user_role: UserRole,
    pub edit_time: DateTime<Utc>,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
    pub is_delete: bool,
}

impl From<&User> for AdminUserVo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            user_account: user.user_account.clone(),
            user_name: user.user_name.clone(),
            user_avatar: user.user_avatar.clone(),
            user_profile: user.user_profile.clone(),
            user_role: user.user_role,
            edit_time: user.edit_time,
            create_time: user.create_time,
            update_time: user.update_time,
            is_delete: user.is_delete,
        }
    }
}

/// One page of results with the normalized paging parameters.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub records: Vec<T>,
    pub total: i64,
    pub page_num: i64,
    pub page_size: i64,
}
