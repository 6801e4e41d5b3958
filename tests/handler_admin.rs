mod common;

use serde_json::{Value, json};
use sqlx::PgPool;

#[sqlx::test]
async fn test_admin_routes_require_login(pool: PgPool) {
    let server = common::create_test_server(pool);

    let add = server
        .post("/user/add")
        .json(&json!({"userAccount": "newbie01"}))
        .await
        .json::<Value>();
    let get = server.get("/user/get?id=1").await.json::<Value>();
    let list = server
        .post("/user/list/page/vo")
        .json(&json!({}))
        .await
        .json::<Value>();

    for json in [add, get, list] {
        assert_eq!(json["code"], 40100);
    }
}

#[sqlx::test]
async fn test_admin_routes_reject_regular_users(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    common::create_test_user(&pool, "alice123", "user").await;
    let token = common::login(&server, "alice123", common::TEST_PASSWORD).await;

    let response = server
        .post("/user/delete")
        .authorization_bearer(&token)
        .json(&json!({"id": 1}))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["code"], 40101);
    assert_eq!(json["message"], "No permission");
}

#[sqlx::test]
async fn test_demoted_admin_loses_access(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let token = common::admin_token(&pool, &server).await;

    sqlx::query("UPDATE users SET user_role = 'user' WHERE user_account = 'root_admin'")
        .execute(&pool)
        .await
        .unwrap();

    let json = server
        .get("/user/get?id=1")
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    assert_eq!(json["code"], 40101);
}

#[sqlx::test]
async fn test_add_user_with_default_password(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let token = common::admin_token(&pool, &server).await;

    let response = server
        .post("/user/add")
        .authorization_bearer(&token)
        .json(&json!({
            "userAccount": "newbie01",
            "userName": "Newbie",
            "userRole": "user"
        }))
        .await;

    let json = response.json::<Value>();
    assert_eq!(json["code"], 0);
    let id = json["data"].as_i64().unwrap();
    assert!(id > 0);

    let vo = server
        .get(&format!("/user/get/vo?id={id}"))
        .await
        .json::<Value>();
    assert_eq!(vo["code"], 0);
    assert_eq!(vo["data"]["userAccount"], "newbie01");
    assert_eq!(vo["data"]["userName"], "Newbie");
    assert!(vo["data"].get("userPassword").is_none());

    // The new account can log in with the configured default password.
    common::login(&server, "newbie01", "12345678").await;
}

#[sqlx::test]
async fn test_add_user_validation_names_client_fields(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let token = common::admin_token(&pool, &server).await;

    let json = server
        .post("/user/add")
        .authorization_bearer(&token)
        .json(&json!({"userAccount": ""}))
        .await
        .json::<Value>();

    assert_eq!(json["code"], 40000);
    assert_eq!(json["message"], "Invalid request parameters: userAccount");
}

#[sqlx::test]
async fn test_add_user_rejects_unknown_role_and_duplicates(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let token = common::admin_token(&pool, &server).await;

    let bad_role = server
        .post("/user/add")
        .authorization_bearer(&token)
        .json(&json!({"userAccount": "newbie01", "userRole": "root"}))
        .await
        .json::<Value>();
    assert_eq!(bad_role["code"], 40000);
    assert_eq!(bad_role["message"], "Invalid user role: root");

    let duplicate = server
        .post("/user/add")
        .authorization_bearer(&token)
        .json(&json!({"userAccount": "root_admin"}))
        .await
        .json::<Value>();
    assert_eq!(duplicate["code"], 40000);
    assert_eq!(duplicate["message"], "Duplicate account");
}

#[sqlx::test]
async fn test_get_user_returns_full_record_without_password(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let token = common::admin_token(&pool, &server).await;
    let id = common::create_test_user(&pool, "alice123", "user").await;

    let json = server
        .get(&format!("/user/get?id={id}"))
        .authorization_bearer(&token)
        .await
        .json::<Value>();

    assert_eq!(json["code"], 0);
    assert_eq!(json["data"]["userAccount"], "alice123");
    assert!(json["data"].get("updateTime").is_some());
    assert!(json["data"].get("editTime").is_some());
    assert!(json["data"].get("userPassword").is_none());
}

#[sqlx::test]
async fn test_update_user(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let token = common::admin_token(&pool, &server).await;
    let id = common::create_test_user(&pool, "alice123", "user").await;

    let update = server
        .post("/user/update")
        .authorization_bearer(&token)
        .json(&json!({"id": id, "userProfile": "hello", "userName": ""}))
        .await
        .json::<Value>();
    assert_eq!(update["code"], 0);
    assert_eq!(update["data"], true);

    let vo = server
        .get(&format!("/user/get/vo?id={id}"))
        .await
        .json::<Value>();
    assert_eq!(vo["data"]["userProfile"], "hello");
    assert_eq!(vo["data"]["userName"], "alice123");
}

#[sqlx::test]
async fn test_update_ignores_account_and_password(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let token = common::admin_token(&pool, &server).await;
    let id = common::create_test_user(&pool, "alice123", "user").await;
    let hash_before = common::stored_password(&pool, id).await;

    let update = server
        .post("/user/update")
        .authorization_bearer(&token)
        .json(&json!({
            "id": id,
            "userAccount": "hijacked",
            "userPassword": "newpassword",
            "userName": "Alice"
        }))
        .await
        .json::<Value>();
    assert_eq!(update["code"], 0);
    assert_eq!(update["data"], true);

    let vo = server
        .get(&format!("/user/get/vo?id={id}"))
        .await
        .json::<Value>();
    assert_eq!(vo["data"]["userAccount"], "alice123");
    assert_eq!(vo["data"]["userName"], "Alice");
    assert_eq!(common::stored_password(&pool, id).await, hash_before);

    // The old credentials still work; the supplied ones do not.
    common::login(&server, "alice123", common::TEST_PASSWORD).await;
    let hijacked = server
        .post("/user/login")
        .json(&json!({"userAccount": "hijacked", "userPassword": "newpassword"}))
        .await
        .json::<Value>();
    assert_eq!(hijacked["code"], 40000);
}

#[sqlx::test]
async fn test_update_missing_user(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let token = common::admin_token(&pool, &server).await;

    let missing = server
        .post("/user/update")
        .authorization_bearer(&token)
        .json(&json!({"id": 99999, "userName": "ghost"}))
        .await
        .json::<Value>();
    assert_eq!(missing["code"], 40400);

    let no_id = server
        .post("/user/update")
        .authorization_bearer(&token)
        .json(&json!({"userName": "ghost"}))
        .await
        .json::<Value>();
    assert_eq!(no_id["code"], 40000);
}

#[sqlx::test]
async fn test_delete_user(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let token = common::admin_token(&pool, &server).await;
    let id = common::create_test_user(&pool, "alice123", "user").await;

    let deleted = server
        .post("/user/delete")
        .authorization_bearer(&token)
        .json(&json!({"id": id}))
        .await
        .json::<Value>();
    assert_eq!(deleted["code"], 0);
    assert_eq!(deleted["data"], true);

    let again = server
        .post("/user/delete")
        .authorization_bearer(&token)
        .json(&json!({"id": id}))
        .await
        .json::<Value>();
    assert_eq!(again["code"], 40400);

    let vo = server
        .get(&format!("/user/get/vo?id={id}"))
        .await
        .json::<Value>();
    assert_eq!(vo["code"], 40400);

    let invalid = server
        .post("/user/delete")
        .authorization_bearer(&token)
        .json(&json!({"id": 0}))
        .await
        .json::<Value>();
    assert_eq!(invalid["code"], 40000);
}

#[sqlx::test]
async fn test_list_users_page(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let token = common::admin_token(&pool, &server).await;
    for account in ["alpha001", "alpha002", "beta0001"] {
        common::create_test_user(&pool, account, "user").await;
    }

    let json = server
        .post("/user/list/page/vo")
        .authorization_bearer(&token)
        .json(&json!({
            "pageNum": 1,
            "pageSize": 1,
            "userAccount": "alpha",
            "sortField": "userAccount",
            "sortOrder": "ascend"
        }))
        .await
        .json::<Value>();

    assert_eq!(json["code"], 0);
    assert_eq!(json["data"]["total"], 2);
    assert_eq!(json["data"]["pageNum"], 1);
    assert_eq!(json["data"]["pageSize"], 1);
    let records = json["data"]["records"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["userAccount"], "alpha001");
    assert!(records[0].get("userPassword").is_none());
}

#[sqlx::test]
async fn test_list_users_normalizes_paging(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let token = common::admin_token(&pool, &server).await;

    let json = server
        .post("/user/list/page/vo")
        .authorization_bearer(&token)
        .json(&json!({"pageNum": 0, "pageSize": 500}))
        .await
        .json::<Value>();

    assert_eq!(json["code"], 0);
    assert_eq!(json["data"]["pageNum"], 1);
    assert_eq!(json["data"]["pageSize"], 100);
    assert_eq!(json["data"]["total"], 1);
}

#[sqlx::test]
async fn test_list_users_rejects_unknown_sort_field(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    let token = common::admin_token(&pool, &server).await;

    let json = server
        .post("/user/list/page/vo")
        .authorization_bearer(&token)
        .json(&json!({"sortField": "userPassword"}))
        .await
        .json::<Value>();

    assert_eq!(json["code"], 40000);
    assert_eq!(json["message"], "Unsupported sort field: userPassword");
}
