//! 请求超时
//!
//! 超过时限的请求返回 408 信封，而不是断开连接

use std::time::Duration;

use axum::{BoxError, Router, error_handling::HandleErrorLayer};
use tower::ServiceBuilder;
use tracing::warn;

use crate::error::ApiError;

/// 为路由加上请求超时
pub fn with_request_timeout(router: Router, duration: Duration) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_timeout))
            .timeout(duration),
    )
}

async fn handle_timeout(err: BoxError) -> ApiError {
    if err.is::<tower::timeout::error::Elapsed>() {
        warn!("Request timed out");
        ApiError::Timeout
    } else {
        ApiError::Internal(err.to_string())
    }
}
