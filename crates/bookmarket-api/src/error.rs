//! Bookmarket API 错误类型定义
//!
//! 所有处理器的失败出口都汇聚到 [`ApiError`]，再统一翻译为
//! `{code, status, message, data}` 响应信封。

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use validator::ValidationErrors;

use crate::dto::ApiResponse;

/// 系统级错误对外展示的统一消息
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// API 错误类型
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // 请求错误
    #[error("{message}")]
    MalformedBody {
        message: &'static str,
        detail: String,
    },
    #[error("{message}")]
    Validation {
        message: &'static str,
        fields: Vec<String>,
    },

    // 资源不存在
    #[error("Book with id: {0} not found")]
    BookNotFound(String),
    #[error("user with id: {0} not found")]
    UserNotFound(String),
    #[error("Books not available, please insert first data")]
    BooksUnavailable,

    // 业务冲突
    #[error("Create user failed")]
    DuplicateEmail,

    // 认证与授权
    #[error("user or password incorrect")]
    InvalidCredentials,
    #[error("missing or malformed jwt")]
    MissingToken,
    #[error("invalid or expired jwt")]
    InvalidToken,
    #[error("unauthorized")]
    NotPermitted,

    // 写入失败，message 描述失败的操作
    #[error("{message}")]
    Persistence {
        message: &'static str,
        detail: String,
    },

    // 系统错误
    #[error("请求处理超时")]
    Timeout,
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),
    #[error("内部错误: {0}")]
    Internal(String),
}

impl ApiError {
    /// 请求体无法解析
    pub fn malformed(message: &'static str, rejection: JsonRejection) -> Self {
        Self::MalformedBody {
            message,
            detail: rejection.body_text(),
        }
    }

    /// 请求体字段校验失败
    ///
    /// 字段级消息按字母序排列，保证响应稳定
    pub fn validation(message: &'static str, errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => format!("{}: {}", field, msg),
                    None => format!("{}: {}", field, e.code),
                })
            })
            .collect();
        fields.sort();

        Self::Validation { message, fields }
    }

    /// 为写操作中的系统错误附加操作上下文
    ///
    /// 业务错误原样返回，系统错误转换为带操作名的 Persistence 错误，
    /// 原始错误只记录日志。
    pub fn during(self, message: &'static str) -> Self {
        match self {
            Self::Database(_) | Self::Internal(_) => {
                tracing::error!(error = %self, operation = message, "Store write failed");
                Self::Persistence {
                    message,
                    detail: INTERNAL_ERROR_MESSAGE.to_string(),
                }
            }
            other => other,
        }
    }

    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedBody { .. }
            | Self::Validation { .. }
            | Self::BookNotFound(_)
            | Self::UserNotFound(_)
            | Self::BooksUnavailable
            | Self::DuplicateEmail
            | Self::InvalidCredentials
            | Self::MissingToken
            | Self::Persistence { .. } => StatusCode::BAD_REQUEST,

            Self::InvalidToken | Self::NotPermitted => StatusCode::UNAUTHORIZED,

            Self::Timeout => StatusCode::REQUEST_TIMEOUT,

            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回错误码（用于日志检索）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedBody { .. } => "MALFORMED_BODY",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::BookNotFound(_) => "BOOK_NOT_FOUND",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::BooksUnavailable => "BOOKS_UNAVAILABLE",
            Self::DuplicateEmail => "DUPLICATE_EMAIL",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::MissingToken => "MISSING_TOKEN",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::NotPermitted => "NOT_PERMITTED",
            Self::Persistence { .. } => "PERSISTENCE_ERROR",
            Self::Timeout => "TIMEOUT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 信封中的 message 字段
    ///
    /// 系统级错误只返回通用提示，详细信息仅记录日志
    pub fn envelope_message(&self) -> String {
        match self {
            Self::Timeout => "request timeout".to_string(),
            Self::Database(_) | Self::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    /// 信封中的 data 字段
    pub fn envelope_data(&self) -> Value {
        match self {
            Self::MalformedBody { detail, .. } | Self::Persistence { detail, .. } => {
                json!({ "errors": detail })
            }
            Self::Validation { fields, .. } => json!({ "errors": fields }),
            Self::BooksUnavailable => json!([]),
            Self::DuplicateEmail => json!({ "errors": "email already exist" }),
            Self::NotPermitted => json!({ "errors": "not access" }),
            _ => Value::Null,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            Self::Database(e) => tracing::error!(error = %e, "数据库操作失败"),
            Self::Internal(e) => tracing::error!(error = %e, "内部错误"),
            other => tracing::debug!(
                error_code = other.error_code(),
                status = status.as_u16(),
                "Request rejected"
            ),
        }

        ApiResponse::error(status, self.envelope_message(), self.envelope_data()).into_response()
    }
}

/// 服务层 Result 类型别名
pub type Result<T> = std::result::Result<T, ApiError>;
