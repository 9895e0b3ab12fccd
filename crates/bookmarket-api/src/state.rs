//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use std::sync::Arc;

use crate::auth::{JwtConfig, JwtManager};
use crate::repository::{
    BookRepositoryTrait, MemoryBookRepository, MemoryUserRepository, UserRepositoryTrait,
};

/// Axum 应用共享状态
///
/// 仓储以 trait 对象注入，同一套处理器既可跑在 PostgreSQL 上，也可跑在内存存储上
#[derive(Clone)]
pub struct AppState {
    /// 用户凭据存储
    pub users: Arc<dyn UserRepositoryTrait>,
    /// 图书集合
    pub books: Arc<dyn BookRepositoryTrait>,
    /// JWT 管理器
    pub jwt_manager: JwtManager,
}

impl AppState {
    /// 创建新的应用状态
    pub fn new(
        users: Arc<dyn UserRepositoryTrait>,
        books: Arc<dyn BookRepositoryTrait>,
        jwt_config: JwtConfig,
    ) -> Self {
        Self {
            users,
            books,
            jwt_manager: JwtManager::new(jwt_config),
        }
    }

    /// 使用内存存储创建应用状态，图书集合预置示例图书
    pub fn in_memory(jwt_config: JwtConfig) -> Self {
        Self::new(
            Arc::new(MemoryUserRepository::new()),
            Arc::new(MemoryBookRepository::with_sample_book()),
            jwt_config,
        )
    }
}
