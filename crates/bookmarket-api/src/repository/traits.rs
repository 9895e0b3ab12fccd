//! Repository trait 定义
//!
//! 为处理器依赖的数据访问提供抽象，便于：
//! 1. 单元测试中使用 mock 实现
//! 2. 在内存存储与 PostgreSQL 之间切换

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Book, BookChanges, User, UserChanges};

/// 用户凭据存储
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// 按存储顺序列出全部用户
    async fn list(&self) -> Result<Vec<User>>;

    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// 写入新用户，邮箱冲突时返回 `ApiError::DuplicateEmail`
    async fn insert(&self, user: User) -> Result<User>;

    /// 单次条件写入更新用户，目标不存在时返回 None
    async fn update(&self, id: &str, changes: UserChanges) -> Result<Option<User>>;

    /// 删除用户，返回是否存在并被删除
    async fn delete(&self, id: &str) -> Result<bool>;
}

/// 图书集合
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepositoryTrait: Send + Sync {
    /// 按集合顺序列出全部图书
    async fn list(&self) -> Result<Vec<Book>>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Book>>;

    /// 追加新图书到集合末尾
    async fn insert(&self, book: Book) -> Result<Book>;

    /// 更新图书并移动到集合末尾，目标不存在时返回 None
    async fn update(&self, id: &str, changes: BookChanges) -> Result<Option<Book>>;

    /// 删除图书，返回是否存在并被删除
    async fn delete(&self, id: &str) -> Result<bool>;
}
