//! 内存用户仓储
//!
//! 用于测试与无数据库运行模式，邮箱唯一性在同一次加锁内校验

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use super::traits::UserRepositoryTrait;
use crate::error::{ApiError, Result};
use crate::models::{User, UserChanges};

/// 内存用户仓储
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepositoryTrait for MemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>> {
        Ok(self.users.lock().clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(self.users.lock().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.users.lock().iter().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, user: User) -> Result<User> {
        let mut users = self.users.lock();

        if users.iter().any(|u| u.email == user.email) {
            return Err(ApiError::DuplicateEmail);
        }

        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: &str, changes: UserChanges) -> Result<Option<User>> {
        let mut users = self.users.lock();

        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };

        user.fullname = changes.fullname;
        if let Some(digest) = changes.password_digest {
            user.password = digest;
        }
        user.updated_at = Utc::now();

        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut users = self.users.lock();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() != before)
    }
}
