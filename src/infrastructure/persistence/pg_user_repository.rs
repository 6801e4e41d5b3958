//! PostgreSQL implementation of the user repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use std::sync::Arc;

use crate::domain::entities::{NewUser, User, UserFilter, UserPatch, UserQuery, UserRole};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::db_error::{is_duplicate_account, like_pattern};

const SELECT_USER: &str = "SELECT id, user_account, user_password, user_name, user_avatar, \
     user_profile, user_role, edit_time, create_time, update_time, is_delete FROM users";

/// PostgreSQL repository for user accounts.
///
/// Every read filters on `is_delete = 0`; writes never touch deleted rows.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: i64,
    user_account: String,
    user_password: String,
    user_name: String,
    user_avatar: String,
    user_profile: String,
    user_role: String,
    edit_time: DateTime<Utc>,
    create_time: DateTime<Utc>,
    update_time: DateTime<Utc>,
    is_delete: i16,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let user_role = UserRole::from_value(&row.user_role).ok_or_else(|| {
            AppError::internal(format!("user {} has unknown role '{}'", row.id, row.user_role))
        })?;

        Ok(User {
            id: row.id,
            user_account: row.user_account,
            user_password: row.user_password,
            user_name: row.user_name,
            user_avatar: row.user_avatar,
            user_profile: row.user_profile,
            user_role,
            edit_time: row.edit_time,
            create_time: row.create_time,
            update_time: row.update_time,
            is_delete: row.is_delete != 0,
        })
    }
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &UserFilter) {
    builder.push(" WHERE is_delete = 0");

    if let Some(id) = filter.id {
        builder.push(" AND id = ").push_bind(id);
    }
    if let Some(role) = filter.user_role {
        builder.push(" AND user_role = ").push_bind(role.as_str());
    }
    for (column, term) in [
        ("user_account", &filter.user_account),
        ("user_name", &filter.user_name),
        ("user_profile", &filter.user_profile),
    ] {
        if let Some(term) = term {
            builder
                .push(format!(" AND {column} LIKE "))
                .push_bind(like_pattern(term));
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn count_by_account(&self, user_account: &str) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE user_account = $1 AND is_delete = 0",
        )
        .bind(user_account)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (user_account, user_password, user_name, user_avatar, user_profile, user_role)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_account, user_password, user_name, user_avatar, user_profile,
                      user_role, edit_time, create_time, update_time, is_delete
            "#,
        )
        .bind(&new_user.user_account)
        .bind(&new_user.user_password)
        .bind(&new_user.user_name)
        .bind(&new_user.user_avatar)
        .bind(&new_user.user_profile)
        .bind(new_user.user_role.as_str())
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_duplicate_account(&e) {
                AppError::params("Duplicate account")
            } else {
                AppError::Database(e)
            }
        })?;

        row.try_into()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let sql = format!("{SELECT_USER} WHERE id = $1 AND is_delete = 0");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_account(&self, user_account: &str) -> Result<Option<User>, AppError> {
        let sql = format!("{SELECT_USER} WHERE user_account = $1 AND is_delete = 0");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_account)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_account_and_password(
        &self,
        user_account: &str,
        user_password: &str,
    ) -> Result<Option<User>, AppError> {
        let sql = format!(
            "{SELECT_USER} WHERE user_account = $1 AND user_password = $2 AND is_delete = 0"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_account)
            .bind(user_password)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(User::try_from).transpose()
    }

    async fn update_password(&self, id: i64, user_password: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET user_password = $2, update_time = NOW()
            WHERE id = $1 AND is_delete = 0
            "#,
        )
        .bind(id)
        .bind(user_password)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_by_id(&self, id: i64, patch: UserPatch) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET user_name = COALESCE($2, user_name),
                user_avatar = COALESCE($3, user_avatar),
                user_profile = COALESCE($4, user_profile),
                user_role = COALESCE($5, user_role),
                edit_time = NOW(),
                update_time = NOW()
            WHERE id = $1 AND is_delete = 0
            "#,
        )
        .bind(id)
        .bind(patch.user_name)
        .bind(patch.user_avatar)
        .bind(patch.user_profile)
        .bind(patch.user_role.map(UserRole::as_str))
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn soft_delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE users SET is_delete = 1, update_time = NOW() WHERE id = $1 AND is_delete = 0",
        )
        .bind(id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn page(&self, query: &UserQuery) -> Result<(Vec<User>, i64), AppError> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM users");
        push_filter(&mut count, &query.filter);
        let total: i64 = count
            .build_query_scalar::<i64>()
            .fetch_one(self.pool.as_ref())
            .await?;

        let mut select = QueryBuilder::<Postgres>::new(SELECT_USER);
        push_filter(&mut select, &query.filter);
        let order = query.sort_order.sql();
        select
            .push(format!(
                " ORDER BY {} {order}, id {order}",
                query.sort_field.column()
            ))
            .push(" LIMIT ")
            .push_bind(query.limit)
            .push(" OFFSET ")
            .push_bind(query.offset);

        let rows: Vec<UserRow> = select
            .build_query_as::<UserRow>()
            .fetch_all(self.pool.as_ref())
            .await?;

        let users = rows
            .into_iter()
            .map(User::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((users, total))
    }
}
