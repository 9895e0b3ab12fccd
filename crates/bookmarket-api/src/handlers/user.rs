//! 用户 HTTP 处理器
//!
//! 注册公开，其余操作需要认证；修改与删除仅限 Token 持有者本人

use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
};
use bookmarket_shared::observability::metrics;
use tracing::info;

use super::parse_payload;
use crate::auth::{Claims, ensure_self_access, hash_password};
use crate::dto::{ApiResponse, CreateUserRequest, UpdateUserRequest, UserDto};
use crate::error::{ApiError, Result};
use crate::models::{User, UserChanges};
use crate::state::AppState;

/// 获取用户列表
///
/// GET /v1/users
pub async fn list_users(State(state): State<AppState>) -> Result<ApiResponse<Vec<UserDto>>> {
    let users = state.users.list().await?;
    let items = users.into_iter().map(UserDto::from).collect();

    Ok(ApiResponse::ok("list of users", items))
}

/// 获取用户详情
///
/// GET /v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<UserDto>> {
    let user = state
        .users
        .find_by_id(&id)
        .await?
        .ok_or(ApiError::UserNotFound(id))?;

    Ok(ApiResponse::ok("Data of user", user.into()))
}

/// 注册用户
///
/// POST /v1/users
pub async fn create_user(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<ApiResponse<UserDto>> {
    let req = parse_payload(payload, "Create user failed")?;

    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(ApiError::DuplicateEmail);
    }

    let digest = hash_password(&req.password)?;
    let user = state
        .users
        .insert(User::new(req.fullname, req.email, digest))
        .await?;
    metrics::record_user_created();
    info!(user_id = %user.id, "User created");

    Ok(ApiResponse::created("User has been created", user.into()))
}

/// 更新用户
///
/// PUT /v1/users/{id}
///
/// 先校验访问权限再解析请求体；password 为空时保留原密码
pub async fn update_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<ApiResponse<UserDto>> {
    ensure_self_access(&claims, &id)?;
    let req = parse_payload(payload, "Update user failed")?;

    let password_digest = req.new_password().map(hash_password).transpose()?;
    let changes = UserChanges {
        fullname: req.fullname,
        password_digest,
    };

    let user = state
        .users
        .update(&id, changes)
        .await
        .map_err(|e| e.during("updated user failed"))?
        .ok_or(ApiError::UserNotFound(id))?;
    info!(user_id = %user.id, "User updated");

    Ok(ApiResponse::ok("User has been updated", user.into()))
}

/// 删除用户
///
/// DELETE /v1/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>> {
    ensure_self_access(&claims, &id)?;

    let deleted = state
        .users
        .delete(&id)
        .await
        .map_err(|e| e.during("delete user failed"))?;
    if !deleted {
        return Err(ApiError::UserNotFound(id));
    }
    info!(user_id = %id, "User deleted");

    Ok(ApiResponse::empty("User has been deleted"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::http::StatusCode;
    use fake::Fake;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use serde_json::{Value, json};

    use crate::error::ApiError;
    use crate::handlers::test_support::{app_with, bearer_for, memory_app, send};
    use crate::repository::{MemoryBookRepository, MockUserRepositoryTrait};

    fn signup_body() -> Value {
        let fullname: String = Name().fake();
        let email: String = SafeEmail().fake();
        json!({"fullname": fullname, "email": email, "password": "s3cret-pass"})
    }

    async fn signup(app: &Router) -> (String, Value) {
        let body = signup_body();
        let (status, created) = send(app, "POST", "/v1/users", Some(body.clone()), None).await;
        assert_eq!(status, StatusCode::CREATED);
        (created["data"]["id"].as_str().unwrap().to_string(), body)
    }

    #[tokio::test]
    async fn test_signup_hides_password() {
        let (app, _) = memory_app();
        let body = signup_body();

        let (status, created) = send(&app, "POST", "/v1/users", Some(body.clone()), None).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["message"], "User has been created");
        assert!(!created["data"]["id"].as_str().unwrap().is_empty());
        assert_eq!(created["data"]["email"], body["email"]);
        assert!(created["data"].get("password").is_none());
    }

    #[tokio::test]
    async fn test_signup_duplicate_email() {
        let (app, _) = memory_app();
        let (_, body) = signup(&app).await;

        let (status, dup) = send(&app, "POST", "/v1/users", Some(body), None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(dup["message"], "Create user failed");
        assert_eq!(dup["data"], json!({"errors": "email already exist"}));
    }

    #[tokio::test]
    async fn test_signup_validation_and_malformed_body() {
        let (app, _) = memory_app();

        let (status, body) = send(
            &app,
            "POST",
            "/v1/users",
            Some(json!({"fullname": "Jane", "email": "not-an-email", "password": "x"})),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Create user failed");
        assert_eq!(
            body["data"]["errors"],
            json!(["email: email must be a valid email address"])
        );

        let (status, body) = send(&app, "POST", "/v1/users", Some(json!("oops")), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["data"]["errors"].is_string());
    }

    #[tokio::test]
    async fn test_list_users_empty_is_ok() {
        let (app, _) = memory_app();
        let auth = bearer_for("anyone");

        let (status, body) = send(&app, "GET", "/v1/users", None, Some(&auth)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "list of users");
        assert_eq!(body["data"], json!([]));
    }

    #[tokio::test]
    async fn test_get_user_and_not_found() {
        let (app, _) = memory_app();
        let (id, body) = signup(&app).await;
        let auth = bearer_for(&id);

        let (status, found) = send(&app, "GET", &format!("/v1/users/{}", id), None, Some(&auth)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(found["message"], "Data of user");
        assert_eq!(found["data"]["fullname"], body["fullname"]);

        let (status, missing) = send(&app, "GET", "/v1/users/ghost", None, Some(&auth)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(missing["message"], "user with id: ghost not found");
    }

    #[tokio::test]
    async fn test_mutating_other_user_is_denied() {
        let (app, state) = memory_app();
        let (victim, _) = signup(&app).await;
        let (intruder, _) = signup(&app).await;
        let auth = bearer_for(&intruder);

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/v1/users/{}", victim),
            Some(json!({"fullname": "Hijacked"})),
            Some(&auth),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "unauthorized");
        assert_eq!(body["data"], json!({"errors": "not access"}));

        let (status, _) = send(&app, "DELETE", &format!("/v1/users/{}", victim), None, Some(&auth)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(state.users.find_by_id(&victim).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_denied_before_body_is_parsed() {
        let (app, _) = memory_app();
        let auth = bearer_for("someone");

        let (status, _) = send(&app, "PUT", "/v1/users/other", Some(json!("garbage")), Some(&auth)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_update_self_keeps_password_when_empty() {
        let (app, state) = memory_app();
        let (id, _) = signup(&app).await;
        let before = state.users.find_by_id(&id).await.unwrap().unwrap();
        let auth = bearer_for(&id);

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/v1/users/{}", id),
            Some(json!({"fullname": "New Name", "password": ""})),
            Some(&auth),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "User has been updated");
        assert_eq!(body["data"]["fullname"], "New Name");
        let after = state.users.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(after.password, before.password);
    }

    #[tokio::test]
    async fn test_update_validation_failure() {
        let (app, _) = memory_app();
        let (id, _) = signup(&app).await;
        let auth = bearer_for(&id);

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/v1/users/{}", id),
            Some(json!({"fullname": ""})),
            Some(&auth),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Update user failed");
    }

    #[tokio::test]
    async fn test_delete_self_then_missing() {
        let (app, _) = memory_app();
        let (id, _) = signup(&app).await;
        let auth = bearer_for(&id);
        let uri = format!("/v1/users/{}", id);

        let (status, body) = send(&app, "DELETE", &uri, None, Some(&auth)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "User has been deleted");
        assert!(body["data"].is_null());

        let (status, body) = send(&app, "DELETE", &uri, None, Some(&auth)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], format!("user with id: {} not found", id));
    }

    #[tokio::test]
    async fn test_update_store_failure_reports_operation() {
        let mut users = MockUserRepositoryTrait::new();
        users
            .expect_update()
            .returning(|_, _| Err(ApiError::Internal("connection reset".into())));
        let app = app_with(Arc::new(users), Arc::new(MemoryBookRepository::new()));
        let auth = bearer_for("user-1");

        let (status, body) = send(
            &app,
            "PUT",
            "/v1/users/user-1",
            Some(json!({"fullname": "Name"})),
            Some(&auth),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "updated user failed");
        assert_eq!(body["data"], json!({"errors": "internal server error"}));
    }

    #[tokio::test]
    async fn test_lookup_store_failure_does_not_fall_through() {
        let mut users = MockUserRepositoryTrait::new();
        users
            .expect_find_by_email()
            .returning(|_| Err(ApiError::Internal("connection reset".into())));
        users.expect_insert().never();
        let app = app_with(Arc::new(users), Arc::new(MemoryBookRepository::new()));

        let (status, body) = send(&app, "POST", "/v1/users", Some(signup_body()), None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "internal server error");
        assert!(body["data"].is_null());
    }
}
