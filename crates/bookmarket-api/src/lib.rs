//! 图书市场 REST API 服务
//!
//! 提供图书与用户的增删改查，以及基于 JWT 的登录认证。
//!
//! ## 核心功能
//!
//! - **图书管理**：进程内有序集合，读取公开，写入需要认证
//! - **用户管理**：注册公开，查询需要认证，修改和删除仅限本人
//! - **登录认证**：bcrypt 校验密码后签发 HS256 Token
//!
//! ## 模块结构
//!
//! - `auth`: Token 签发验证、密码哈希、自身访问策略
//! - `dto`: 请求体与响应信封
//! - `error`: 错误类型与信封翻译
//! - `handlers`: HTTP 请求处理器
//! - `middleware`: 认证与请求超时中间件
//! - `models`: 图书与用户实体
//! - `repository`: 数据访问层（PostgreSQL 与内存实现）
//! - `routes`: 路由配置
//! - `state`: 应用状态

pub mod auth;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod state;

use sqlx::migrate::Migrator;

/// 服务名，用于配置加载与健康检查响应
pub const SERVICE_NAME: &str = "bookmarket-api";

/// 内嵌的数据库迁移
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

// 重新导出核心类型
pub use auth::{Claims, JwtConfig, JwtManager};
pub use dto::{ApiResponse, UserDto};
pub use error::{ApiError, Result};
pub use models::{Book, User};
pub use routes::build_router;
pub use state::AppState;
