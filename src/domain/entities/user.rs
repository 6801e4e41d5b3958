//! User entity and its creation and update payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Access level of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    /// Value stored in the `user_role` column.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Parses a stored or client-supplied role value.
    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "user" => Some(Self::User),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// A user account as stored, including the password hash.
///
/// Never serialized directly; responses go through the view types in
/// [`crate::application::views`].
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub user_account: String,
    pub user_password: String,
    pub user_name: String,
    pub user_avatar: String,
    pub user_profile: String,
    pub user_role: UserRole,
    pub edit_time: DateTime<Utc>,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
    pub is_delete: bool,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.user_role == UserRole::Admin
    }
}

/// Input for inserting a user. `user_password` must already be hashed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub user_account: String,
    pub user_password: String,
    pub user_name: String,
    pub user_avatar: String,
    pub user_profile: String,
    pub user_role: UserRole,
}

/// Partial update of a user's profile. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub user_name: Option<String>,
    pub user_avatar: Option<String>,
    pub user_profile: Option<String>,
    pub user_role: Option<UserRole>,
}
