#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use serde_json::json;
use sqlx::PgPool;
use user_center::application::services::PasswordEncoder;
use user_center::config::Config;
use user_center::routes::api_router;
use user_center::server::build_state;
use user_center::state::AppState;

pub const TEST_PASSWORD: &str = "password1";

const TEST_CONFIG: &str = r#"
database:
  dbname: user_center_test
security:
  token_secret: test-signing-secret
  token_ttl_seconds: 3600
"#;

pub fn test_config() -> Config {
    let mut config = Config::from_yaml(TEST_CONFIG).unwrap();
    config.security.token_secret = "test-signing-secret".to_string();
    config
}

pub fn create_test_state(pool: PgPool) -> AppState {
    build_state(pool, &test_config())
}

pub fn create_test_app(pool: PgPool) -> Router {
    api_router(create_test_state(pool), None)
}

pub fn create_test_server(pool: PgPool) -> TestServer {
    TestServer::new(create_test_app(pool)).unwrap()
}

/// Inserts a row directly with an already-encoded password.
pub async fn insert_user(pool: &PgPool, account: &str, password_hash: &str, role: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO users (user_account, user_password, user_name, user_role)
         VALUES ($1, $2, $1, $3) RETURNING id",
    )
    .bind(account)
    .bind(password_hash)
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Inserts a user whose password is [`TEST_PASSWORD`] under the current scheme.
pub async fn create_test_user(pool: &PgPool, account: &str, role: &str) -> i64 {
    let hash = PasswordEncoder::new("yumi123")
        .hash(TEST_PASSWORD)
        .await
        .unwrap();
    insert_user(pool, account, &hash, role).await
}

/// Inserts a user whose password is stored as a salted MD5 digest.
pub async fn create_legacy_user(pool: &PgPool, account: &str, password: &str) -> i64 {
    let digest = PasswordEncoder::new("yumi123").legacy_digest(password);
    insert_user(pool, account, &digest, "user").await
}

pub async fn stored_password(pool: &PgPool, id: i64) -> String {
    sqlx::query_scalar("SELECT user_password FROM users WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn login(server: &TestServer, account: &str, password: &str) -> String {
    let response = server
        .post("/user/login")
        .json(&json!({"userAccount": account, "userPassword": password}))
        .await;
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["code"], 0, "login failed: {body}");
    body["data"]["token"].as_str().unwrap().to_string()
}

/// Creates an admin account and returns its bearer token.
pub async fn admin_token(pool: &PgPool, server: &TestServer) -> String {
    create_test_user(pool, "root_admin", "admin").await;
    login(server, "root_admin", TEST_PASSWORD).await
}
