//! Account business rules: registration, login, session lookup and
//! administrative user management.

use std::sync::Arc;

use crate::application::services::auth_service::{AuthService, Claims};
use crate::application::services::password_encoder::PasswordEncoder;
use crate::application::views::{LoginUserVo, Page, UserVo};
use crate::domain::entities::{
    NewUser, SortField, SortOrder, User, UserFilter, UserPatch, UserQuery, UserRole,
};
use crate::domain::repositories::UserRepository;
use crate::error::{AppError, ErrorCode, ensure};

pub const MIN_ACCOUNT_LENGTH: usize = 4;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

const INVALID_CREDENTIALS: &str = "Account does not exist or password is incorrect";

/// Fields an administrator supplies when creating an account.
#[derive(Debug, Clone, Default)]
pub struct AddUserInput {
    pub user_account: String,
    pub user_name: Option<String>,
    pub user_avatar: Option<String>,
    pub user_profile: Option<String>,
    pub user_role: Option<String>,
}

/// Profile changes for an existing account. Empty strings mean "unchanged".
#[derive(Debug, Clone, Default)]
pub struct UpdateUserInput {
    pub id: i64,
    pub user_name: Option<String>,
    pub user_avatar: Option<String>,
    pub user_profile: Option<String>,
    pub user_role: Option<String>,
}

/// Raw listing parameters before normalization.
#[derive(Debug, Clone, Default)]
pub struct ListUsersInput {
    pub page_num: i64,
    pub page_size: i64,
    pub sort_field: Option<String>,
    pub sort_order: Option<String>,
    pub id: Option<i64>,
    pub user_account: Option<String>,
    pub user_name: Option<String>,
    pub user_profile: Option<String>,
    pub user_role: Option<String>,
}

/// Service implementing the account use cases.
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    auth_service: Arc<AuthService>,
    password_encoder: PasswordEncoder,
    default_password: String,
}

impl UserService {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        auth_service: Arc<AuthService>,
        password_encoder: PasswordEncoder,
        default_password: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            auth_service,
            password_encoder,
            default_password: default_password.into(),
        }
    }

    /// Registers a new account and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorCode::ParamsError`] if a field is blank, the account is
    /// shorter than 4 characters, either password is shorter than 8
    /// characters, the passwords differ, or the account already exists.
    pub async fn register(
        &self,
        user_account: &str,
        user_password: &str,
        check_password: &str,
    ) -> Result<i64, AppError> {
        ensure(
            !is_blank(user_account) && !is_blank(user_password) && !is_blank(check_password),
            ErrorCode::ParamsError,
            "Parameters are empty",
        )?;
        ensure(
            char_len(user_account) >= MIN_ACCOUNT_LENGTH,
            ErrorCode::ParamsError,
            "Account is too short",
        )?;
        ensure(
            char_len(user_password) >= MIN_PASSWORD_LENGTH
                && char_len(check_password) >= MIN_PASSWORD_LENGTH,
            ErrorCode::ParamsError,
            "Password is too short",
        )?;
        ensure(
            user_password == check_password,
            ErrorCode::ParamsError,
            "The two passwords do not match",
        )?;

        let existing = self.repository.count_by_account(user_account).await?;
        ensure(existing == 0, ErrorCode::ParamsError, "Duplicate account")?;

        let user_password = self.password_encoder.hash(user_password).await?;
        let user = self
            .repository
            .create(NewUser {
                user_account: user_account.to_string(),
                user_password,
                user_name: user_account.to_string(),
                user_avatar: String::new(),
                user_profile: String::new(),
                user_role: UserRole::User,
            })
            .await?;

        tracing::info!(user_id = user.id, "user registered");
        Ok(user.id)
    }

    /// Verifies credentials and opens a session.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorCode::ParamsError`] for blank or too-short input, and
    /// the same generic message whether the account is unknown or the
    /// password is wrong.
    pub async fn login(
        &self,
        user_account: &str,
        user_password: &str,
    ) -> Result<LoginUserVo, AppError> {
        ensure(
            !is_blank(user_account) && !is_blank(user_password),
            ErrorCode::ParamsError,
            "Parameters are empty",
        )?;
        ensure(
            char_len(user_account) >= MIN_ACCOUNT_LENGTH,
            ErrorCode::ParamsError,
            "Account is too short",
        )?;
        ensure(
            char_len(user_password) >= MIN_PASSWORD_LENGTH,
            ErrorCode::ParamsError,
            "Password is too short",
        )?;

        let user = self
            .authenticate(user_account, user_password)
            .await?
            .ok_or_else(|| AppError::params(INVALID_CREDENTIALS))?;

        let issued = self.auth_service.issue(&user)?;
        tracing::info!(user_id = user.id, "user logged in");
        Ok(LoginUserVo::from(&user).with_token(issued))
    }

    async fn authenticate(
        &self,
        user_account: &str,
        user_password: &str,
    ) -> Result<Option<User>, AppError> {
        let Some(user) = self.repository.find_by_account(user_account).await? else {
            self.password_encoder.verify_dummy(user_password).await?;
            return Ok(None);
        };

        if !PasswordEncoder::is_legacy(&user.user_password) {
            let matches = self
                .password_encoder
                .verify(user_password, &user.user_password)
                .await?;
            return Ok(matches.then_some(user));
        }

        let digest = self.password_encoder.legacy_digest(user_password);
        let Some(user) = self
            .repository
            .find_by_account_and_password(user_account, &digest)
            .await?
        else {
            self.password_encoder.verify_dummy(user_password).await?;
            return Ok(None);
        };

        let upgraded = self.password_encoder.hash(user_password).await?;
        match self.repository.update_password(user.id, &upgraded).await {
            Ok(_) => tracing::info!(user_id = user.id, "upgraded legacy password hash"),
            Err(e) => tracing::warn!(user_id = user.id, error = %e, "legacy password upgrade failed"),
        }

        Ok(Some(user))
    }

    /// Loads the user behind a verified session.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorCode::NotLoginError`] if the account no longer exists.
    pub async fn get_login_user(&self, claims: &Claims) -> Result<User, AppError> {
        let id = claims
            .user_id()
            .ok_or_else(|| AppError::business(ErrorCode::NotLoginError))?;

        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::business(ErrorCode::NotLoginError))
    }

    /// Ends the session described by `claims`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorCode::OperationError`] when there is no session.
    pub fn logout(&self, claims: Option<&Claims>) -> Result<bool, AppError> {
        let claims =
            claims.ok_or_else(|| AppError::with_message(ErrorCode::OperationError, "User not logged in"))?;

        self.auth_service.revoke(claims);
        tracing::info!(user_id = %claims.sub, "user logged out");
        Ok(true)
    }

    /// Creates an account with the configured default password.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorCode::ParamsError`] for a blank account, an unknown role
    /// or a duplicate account.
    pub async fn add_user(&self, input: AddUserInput) -> Result<i64, AppError> {
        ensure(
            !is_blank(&input.user_account),
            ErrorCode::ParamsError,
            "Parameters are empty",
        )?;
        let user_role = parse_role(input.user_role.as_deref())?.unwrap_or_default();
        let user_password = self.password_encoder.hash(&self.default_password).await?;

        let user = self
            .repository
            .create(NewUser {
                user_account: input.user_account,
                user_password,
                user_name: input.user_name.unwrap_or_default(),
                user_avatar: input.user_avatar.unwrap_or_default(),
                user_profile: input.user_profile.unwrap_or_default(),
                user_role,
            })
            .await?;

        tracing::info!(user_id = user.id, role = user_role.as_str(), "user added");
        Ok(user.id)
    }

    /// # Errors
    ///
    /// Returns [`ErrorCode::ParamsError`] for a non-positive id and
    /// [`ErrorCode::NotFoundError`] if no live user has it.
    pub async fn get_by_id(&self, id: i64) -> Result<User, AppError> {
        ensure(id > 0, ErrorCode::ParamsError, "Invalid user id")?;

        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::business(ErrorCode::NotFoundError))
    }

    /// Soft-deletes a user.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorCode::ParamsError`] for a non-positive id and
    /// [`ErrorCode::NotFoundError`] if no live user has it.
    pub async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        ensure(id > 0, ErrorCode::ParamsError, "Invalid user id")?;

        let deleted = self.repository.soft_delete_by_id(id).await?;
        ensure(deleted, ErrorCode::NotFoundError, ErrorCode::NotFoundError.message())?;

        tracing::info!(user_id = id, "user deleted");
        Ok(true)
    }

    /// Updates name, avatar, profile and role. Account and password never change here.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorCode::ParamsError`] for a non-positive id or unknown
    /// role and [`ErrorCode::NotFoundError`] if no live user has the id.
    pub async fn update_by_id(&self, input: UpdateUserInput) -> Result<bool, AppError> {
        ensure(input.id > 0, ErrorCode::ParamsError, "Invalid user id")?;

        let patch = UserPatch {
            user_name: non_empty(input.user_name),
            user_avatar: non_empty(input.user_avatar),
            user_profile: non_empty(input.user_profile),
            user_role: parse_role(input.user_role.as_deref())?,
        };

        let updated = self.repository.update_by_id(input.id, patch).await?;
        ensure(updated, ErrorCode::NotFoundError, ErrorCode::NotFoundError.message())?;

        tracing::info!(user_id = input.id, "user updated");
        Ok(true)
    }

    /// Lists live users page by page.
    ///
    /// Non-positive page numbers fall back to 1, non-positive sizes to 10 and
    /// sizes above 100 are capped.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorCode::ParamsError`] for an unknown sort field or role.
    pub async fn list_user_vo_by_page(&self, input: ListUsersInput) -> Result<Page<UserVo>, AppError> {
        let page_num = if input.page_num > 0 { input.page_num } else { 1 };
        let page_size = match input.page_size {
            size if size <= 0 => DEFAULT_PAGE_SIZE,
            size => size.min(MAX_PAGE_SIZE),
        };

        let sort_field = match non_empty(input.sort_field) {
            Some(name) => SortField::parse(&name)
                .ok_or_else(|| AppError::params(format!("Unsupported sort field: {name}")))?,
            None => SortField::default(),
        };
        let sort_order = input
            .sort_order
            .as_deref()
            .map(SortOrder::parse)
            .unwrap_or_default();

        let query = UserQuery {
            filter: UserFilter {
                id: input.id,
                user_account: non_empty(input.user_account),
                user_name: non_empty(input.user_name),
                user_profile: non_empty(input.user_profile),
                user_role: parse_role(input.user_role.as_deref())?,
            },
            sort_field,
            sort_order,
            offset: (page_num - 1).saturating_mul(page_size),
            limit: page_size,
        };

        let (users, total) = self.repository.page(&query).await?;

        Ok(Page {
            records: users.iter().map(UserVo::from).collect(),
            total,
            page_num,
            page_size,
        })
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Empty or missing means "not specified"; anything else must be a known role.
fn parse_role(value: Option<&str>) -> Result<Option<UserRole>, AppError> {
    match value {
        None | Some("") => Ok(None),
        Some(v) => UserRole::from_value(v)
            .map(Some)
            .ok_or_else(|| AppError::params(format!("Invalid user role: {v}"))),
    }
}
