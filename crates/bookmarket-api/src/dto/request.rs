//! 请求 DTO 定义
//!
//! 所有 REST API 的请求体结构。缺失字段按空值处理，由校验规则统一报告。

use serde::Deserialize;
use validator::Validate;

/// 创建或更新图书请求
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct BookPayload {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "author is required"))]
    pub author: String,
}

/// 注册请求
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "fullname is required"))]
    pub fullname: String,
    #[validate(
        length(min = 1, message = "email is required"),
        email(message = "email must be a valid email address")
    )]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// 更新用户请求
///
/// password 为空或缺省时保留原密码
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, message = "fullname is required"))]
    pub fullname: String,
    pub password: Option<String>,
}

impl UpdateUserRequest {
    /// 需要重新设置的新密码
    pub fn new_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}

/// 登录请求
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(
        length(min = 1, message = "email is required"),
        email(message = "email must be a valid email address")
    )]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}
