//! HTTP 请求处理器模块
//!
//! 包含所有 REST API 端点的处理器实现

pub mod auth;
pub mod book;
pub mod health;
pub mod user;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use validator::Validate;

use crate::error::{ApiError, Result};

/// 解析并校验 JSON 请求体
///
/// 解析失败与校验失败共用同一条操作消息
pub(crate) fn parse_payload<T: Validate>(
    payload: std::result::Result<Json<T>, JsonRejection>,
    message: &'static str,
) -> Result<T> {
    let Json(body) = payload.map_err(|rejection| ApiError::malformed(message, rejection))?;
    body.validate()
        .map_err(|errors| ApiError::validation(message, errors))?;
    Ok(body)
}

#[cfg(test)]
pub(crate) mod test_support {
    //! 处理器测试辅助：基于完整路由发送请求并解析信封

    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::auth::{JwtConfig, JwtManager};
    use crate::repository::{BookRepositoryTrait, UserRepositoryTrait};
    use crate::routes::build_router;
    use crate::state::AppState;

    pub const TEST_SECRET: &str = "handler-test-secret";

    pub fn jwt_config() -> JwtConfig {
        JwtConfig {
            secret: TEST_SECRET.to_string(),
            ..JwtConfig::default()
        }
    }

    pub fn memory_app() -> (Router, AppState) {
        let state = AppState::in_memory(jwt_config());
        (build_router(state.clone()), state)
    }

    pub fn app_with(
        users: Arc<dyn UserRepositoryTrait>,
        books: Arc<dyn BookRepositoryTrait>,
    ) -> Router {
        build_router(AppState::new(users, books, jwt_config()))
    }

    pub fn bearer_for(user_id: &str) -> String {
        let (token, _) = JwtManager::new(jwt_config())
            .generate_token(user_id)
            .unwrap();
        format!("Bearer {}", token)
    }

    /// 发送请求，返回状态码与信封
    pub async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
        auth: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = auth {
            builder = builder.header("Authorization", value);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(serde_json::to_vec(&json).unwrap())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let envelope: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(envelope["code"], status.as_u16());
        (status, envelope)
    }
}
