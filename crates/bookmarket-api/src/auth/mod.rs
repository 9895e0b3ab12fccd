//! 认证模块
//!
//! 提供 JWT Token 生成、验证，密码处理与自身访问策略

mod jwt;
mod password;
mod policy;

pub use jwt::{Claims, DEFAULT_DEV_SECRET, JwtConfig, JwtManager};
pub use password::{hash_password, verify_credentials};
#[cfg(test)]
pub(crate) use password::dummy_digest_ready;
pub use policy::ensure_self_access;
