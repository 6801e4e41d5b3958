mod common;

use sqlx::PgPool;
use std::sync::Arc;
use user_center::domain::entities::{
    NewUser, SortField, SortOrder, UserFilter, UserPatch, UserQuery, UserRole,
};
use user_center::domain::repositories::UserRepository;
use user_center::error::ErrorCode;
use user_center::infrastructure::persistence::PgUserRepository;

fn new_user(account: &str) -> NewUser {
    NewUser {
        user_account: account.to_string(),
        user_password: "hash".to_string(),
        user_name: account.to_string(),
        user_avatar: String::new(),
        user_profile: String::new(),
        user_role: UserRole::User,
    }
}

fn page_query(filter: UserFilter) -> UserQuery {
    UserQuery {
        filter,
        limit: 10,
        ..UserQuery::default()
    }
}

#[sqlx::test]
async fn test_create_user(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let user = repo.create(new_user("alice123")).await.unwrap();

    assert!(user.id > 0);
    assert_eq!(user.user_account, "alice123");
    assert_eq!(user.user_role, UserRole::User);
    assert!(!user.is_delete);
}

#[sqlx::test]
async fn test_create_duplicate_account_is_params_error(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    repo.create(new_user("alice123")).await.unwrap();

    let err = repo.create(new_user("alice123")).await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::ParamsError);
    assert!(err.to_string().starts_with("Duplicate account"));
}

#[sqlx::test]
async fn test_deleted_account_name_can_be_reused(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    let first = repo.create(new_user("alice123")).await.unwrap();
    assert!(repo.soft_delete_by_id(first.id).await.unwrap());

    let second = repo.create(new_user("alice123")).await.unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(repo.count_by_account("alice123").await.unwrap(), 1);
}

#[sqlx::test]
async fn test_soft_deleted_user_is_invisible(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    let user = repo.create(new_user("bob12345")).await.unwrap();

    assert!(repo.soft_delete_by_id(user.id).await.unwrap());

    assert!(repo.find_by_id(user.id).await.unwrap().is_none());
    assert!(repo.find_by_account("bob12345").await.unwrap().is_none());
    assert_eq!(repo.count_by_account("bob12345").await.unwrap(), 0);
    assert!(!repo.soft_delete_by_id(user.id).await.unwrap());
    assert!(
        !repo
            .update_by_id(user.id, UserPatch::default())
            .await
            .unwrap()
    );
}

#[sqlx::test]
async fn test_find_by_account_and_password(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    repo.create(new_user("carol123")).await.unwrap();

    assert!(
        repo.find_by_account_and_password("carol123", "hash")
            .await
            .unwrap()
            .is_some()
    );
    assert!(
        repo.find_by_account_and_password("carol123", "other")
            .await
            .unwrap()
            .is_none()
    );
}

#[sqlx::test]
async fn test_update_keeps_account_and_unset_fields(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    let user = repo
        .create(NewUser {
            user_profile: "original profile".to_string(),
            ..new_user("dave1234")
        })
        .await
        .unwrap();

    let patch = UserPatch {
        user_name: Some("Dave".to_string()),
        user_role: Some(UserRole::Admin),
        ..UserPatch::default()
    };
    assert!(repo.update_by_id(user.id, patch).await.unwrap());

    let updated = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(updated.user_name, "Dave");
    assert_eq!(updated.user_role, UserRole::Admin);
    assert_eq!(updated.user_profile, "original profile");
    assert_eq!(updated.user_account, "dave1234");
    assert_eq!(updated.user_password, "hash");
    assert!(updated.update_time >= user.update_time);
}

#[sqlx::test]
async fn test_update_password(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    let user = repo.create(new_user("erin1234")).await.unwrap();

    assert!(repo.update_password(user.id, "new-hash").await.unwrap());
    assert!(!repo.update_password(user.id + 1000, "x").await.unwrap());

    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.user_password, "new-hash");
}

#[sqlx::test]
async fn test_page_counts_and_limits(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    for i in 0..5 {
        repo.create(new_user(&format!("user{i:04}"))).await.unwrap();
    }

    let query = UserQuery {
        limit: 2,
        offset: 2,
        ..UserQuery::default()
    };
    let (users, total) = repo.page(&query).await.unwrap();

    assert_eq!(total, 5);
    assert_eq!(users.len(), 2);
}

#[sqlx::test]
async fn test_page_sorts_by_requested_field(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    for account in ["mike1234", "anna1234", "zack1234"] {
        repo.create(new_user(account)).await.unwrap();
    }

    let query = UserQuery {
        sort_field: SortField::UserAccount,
        sort_order: SortOrder::Ascending,
        limit: 10,
        ..UserQuery::default()
    };
    let (users, _) = repo.page(&query).await.unwrap();
    let accounts: Vec<_> = users.iter().map(|u| u.user_account.as_str()).collect();

    assert_eq!(accounts, ["anna1234", "mike1234", "zack1234"]);
}

#[sqlx::test]
async fn test_page_filters_by_substring_and_role(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    repo.create(new_user("alpha_one")).await.unwrap();
    repo.create(new_user("alpha_two")).await.unwrap();
    repo.create(NewUser {
        user_role: UserRole::Admin,
        ..new_user("beta_admin")
    })
    .await
    .unwrap();

    let (users, total) = repo
        .page(&page_query(UserFilter {
            user_account: Some("alpha".to_string()),
            ..UserFilter::default()
        }))
        .await
        .unwrap();
    assert_eq!(total, 2);
    assert!(users.iter().all(|u| u.user_account.starts_with("alpha")));

    let (admins, total) = repo
        .page(&page_query(UserFilter {
            user_role: Some(UserRole::Admin),
            ..UserFilter::default()
        }))
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(admins[0].user_account, "beta_admin");
}

#[sqlx::test]
async fn test_page_treats_wildcards_literally(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    repo.create(new_user("under_score")).await.unwrap();
    repo.create(new_user("underXscore")).await.unwrap();

    let (users, total) = repo
        .page(&page_query(UserFilter {
            user_account: Some("r_s".to_string()),
            ..UserFilter::default()
        }))
        .await
        .unwrap();

    assert_eq!(total, 1);
    assert_eq!(users[0].user_account, "under_score");

    let (_, total) = repo
        .page(&page_query(UserFilter {
            user_account: Some("%".to_string()),
            ..UserFilter::default()
        }))
        .await
        .unwrap();
    assert_eq!(total, 0);
}

#[sqlx::test]
async fn test_page_excludes_deleted_users(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    let gone = repo.create(new_user("gone1234")).await.unwrap();
    repo.create(new_user("kept1234")).await.unwrap();
    repo.soft_delete_by_id(gone.id).await.unwrap();

    let (users, total) = repo.page(&page_query(UserFilter::default())).await.unwrap();

    assert_eq!(total, 1);
    assert_eq!(users[0].user_account, "kept1234");
}
