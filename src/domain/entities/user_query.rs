//! Filtering, sorting and paging criteria for user listings.

use super::UserRole;

/// Equality and substring filters. Only `Some` fields are applied.
///
/// `user_account`, `user_name` and `user_profile` match as substrings;
/// `id` and `user_role` match exactly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilter {
    pub id: Option<i64>,
    pub user_account: Option<String>,
    pub user_name: Option<String>,
    pub user_profile: Option<String>,
    pub user_role: Option<UserRole>,
}

/// Columns a listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Id,
    UserAccount,
    UserName,
    UserRole,
    #[default]
    CreateTime,
    UpdateTime,
    EditTime,
}

impl SortField {
    /// Accepts the client's camelCase name or the column name.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "id" => Some(Self::Id),
            "userAccount" | "user_account" => Some(Self::UserAccount),
            "userName" | "user_name" => Some(Self::UserName),
            "userRole" | "user_role" => Some(Self::UserRole),
            "createTime" | "create_time" => Some(Self::CreateTime),
            "updateTime" | "update_time" => Some(Self::UpdateTime),
            "editTime" | "edit_time" => Some(Self::EditTime),
            _ => None,
        }
    }

    pub const fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::UserAccount => "user_account",
            Self::UserName => "user_name",
            Self::UserRole => "user_role",
            Self::CreateTime => "create_time",
            Self::UpdateTime => "update_time",
            Self::EditTime => "edit_time",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    /// `"ascend"` sorts ascending; anything else sorts descending.
    pub fn parse(value: &str) -> Self {
        if value == "ascend" {
            Self::Ascending
        } else {
            Self::Descending
        }
    }

    pub const fn sql(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// A fully normalized page request handed to the repository.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserQuery {
    pub filter: UserFilter,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    pub offset: i64,
    pub limit: i64,
}
