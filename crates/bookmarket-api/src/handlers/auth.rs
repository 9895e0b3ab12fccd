//! 认证相关 HTTP 处理器

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use bookmarket_shared::observability::metrics;
use tracing::{info, warn};

use super::parse_payload;
use crate::auth::verify_credentials;
use crate::dto::{ApiResponse, LoginRequest, TokenResponse};
use crate::error::{ApiError, Result};
use crate::state::AppState;

/// 用户登录
///
/// POST /v1/login
///
/// 邮箱不存在与密码错误返回相同响应，且都执行一次 bcrypt 校验
pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiResponse<TokenResponse>> {
    let req = parse_payload(payload, "bad request")?;

    let user = state.users.find_by_email(&req.email).await?;
    let digest = user.as_ref().map(|u| u.password.as_str());

    let user = match (verify_credentials(&req.password, digest)?, user) {
        (true, Some(user)) => user,
        (_, user) => {
            match user {
                Some(user) => warn!(user_id = %user.id, "Login rejected: password mismatch"),
                None => warn!("Login rejected: unknown email"),
            }
            metrics::record_login("rejected");
            return Err(ApiError::InvalidCredentials);
        }
    };

    let (token, _expires_at) = state.jwt_manager.generate_token(&user.id)?;
    metrics::record_login("success");
    info!(user_id = %user.id, "User logged in");

    Ok(ApiResponse::ok("You are logged", TokenResponse { token }))
}
