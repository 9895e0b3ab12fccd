//! 用户模型
//!
//! `User` 持有密码摘要且不实现 Serialize，对外输出一律经由 `UserDto`。

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// 用户实体（对应 users 表）
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: String,
    pub fullname: String,
    pub email: String,
    /// bcrypt 摘要
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// 创建新用户记录，生成 ID 与时间戳
    pub fn new(
        fullname: impl Into<String>,
        email: impl Into<String>,
        password_digest: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            fullname: fullname.into(),
            email: email.into(),
            password: password_digest.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// 用户可变更字段
#[derive(Debug, Clone, PartialEq)]
pub struct UserChanges {
    pub fullname: String,
    /// 新密码摘要，None 表示保留原密码
    pub password_digest: Option<String>,
}
