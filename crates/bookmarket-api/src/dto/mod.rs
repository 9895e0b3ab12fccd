//! DTO 模块
//!
//! 包含所有请求和响应的数据传输对象

pub mod request;
pub mod response;

pub use request::{BookPayload, CreateUserRequest, LoginRequest, UpdateUserRequest};
pub use response::{ApiResponse, STATUS_ERROR, STATUS_SUCCESS, TokenResponse, UserDto};
