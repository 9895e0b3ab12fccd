//! 响应 DTO 定义
//!
//! 所有 REST API 的响应体结构，统一包裹在 [`ApiResponse`] 信封中

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::User;

/// 信封 status 字段：成功
pub const STATUS_SUCCESS: &str = "success";
/// 信封 status 字段：失败
pub const STATUS_ERROR: &str = "error";

/// API 统一响应
///
/// `code` 与 HTTP 状态码保持一致，`data` 为空时序列化为 null
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub status: String,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 200 成功响应
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::success(StatusCode::OK, message, Some(data))
    }

    /// 201 创建成功响应
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::success(StatusCode::CREATED, message, Some(data))
    }

    /// 创建成功响应
    pub fn success(status: StatusCode, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            code: status.as_u16(),
            status: STATUS_SUCCESS.to_string(),
            message: message.into(),
            data,
        }
    }

    /// 创建错误响应
    pub fn error(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            code: status.as_u16(),
            status: STATUS_ERROR.to_string(),
            message: message.into(),
            data: Some(data),
        }
    }

    /// 是否为成功响应
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

impl ApiResponse<()> {
    /// 200 成功响应（data 为 null）
    pub fn empty(message: impl Into<String>) -> Self {
        Self::success(StatusCode::OK, message, None)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// 用户公开信息
///
/// 不包含密码摘要，所有用户相关的响应都只序列化此结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub fullname: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            fullname: user.fullname.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            fullname: user.fullname,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// 登录响应
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}
