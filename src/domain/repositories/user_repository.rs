//! Repository trait for user account data access.

use crate::domain::entities::{NewUser, User, UserPatch, UserQuery};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for user accounts.
///
/// Soft-deleted rows (`is_delete = 1`) are invisible to every read and are
/// never modified again.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_user.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Counts live accounts with the given account name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database errors.
    async fn count_by_account(&self, user_account: &str) -> Result<i64, AppError>;

    /// Inserts a user and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Business`] with the duplicate-account message if a
    /// live account with the same name already exists.
    ///
    /// Returns [`AppError::Database`] on other database errors.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Finds a live user by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Finds a live user by account name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database errors.
    async fn find_by_account(&self, user_account: &str) -> Result<Option<User>, AppError>;

    /// Finds a live user whose stored password equals `user_password` exactly.
    ///
    /// Only meaningful for legacy digests, which are deterministic.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database errors.
    async fn find_by_account_and_password(
        &self,
        user_account: &str,
        user_password: &str,
    ) -> Result<Option<User>, AppError>;

    /// Replaces the stored password hash. Returns `false` if no live row matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database errors.
    async fn update_password(&self, id: i64, user_password: &str) -> Result<bool, AppError>;

    /// Applies a partial update. Returns `false` if no live row matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database errors.
    async fn update_by_id(&self, id: i64, patch: UserPatch) -> Result<bool, AppError>;

    /// Marks a user as deleted. Returns `false` if no live row matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database errors.
    async fn soft_delete_by_id(&self, id: i64) -> Result<bool, AppError>;

    /// Returns one page of matching users and the total match count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database errors.
    async fn page(&self, query: &UserQuery) -> Result<(Vec<User>, i64), AppError>;
}
