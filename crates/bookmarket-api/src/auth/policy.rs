//! 自身访问策略
//!
//! 通过认证的 Token 只能修改或删除其 subject 对应的用户

use crate::auth::Claims;
use crate::error::ApiError;

/// 校验 Token subject 与目标用户 ID 一致
pub fn ensure_self_access(claims: &Claims, target_user_id: &str) -> Result<(), ApiError> {
    if claims.sub == target_user_id {
        Ok(())
    } else {
        tracing::warn!(
            subject = %claims.sub,
            target = %target_user_id,
            "Self-access policy denied request"
        );
        Err(ApiError::NotPermitted)
    }
}
