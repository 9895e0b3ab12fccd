//! 中间件模块

pub mod auth;
pub mod timeout;

pub use auth::{auth_middleware, requires_auth};
pub use timeout::with_request_timeout;
