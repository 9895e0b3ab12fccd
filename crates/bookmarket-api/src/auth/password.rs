//! 密码处理
//!
//! 提供密码哈希和验证功能

use std::sync::OnceLock;

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::error::ApiError;

/// bcrypt 计算成本，单元测试使用最低成本以缩短耗时
const HASH_COST: u32 = if cfg!(test) { 4 } else { DEFAULT_COST };

/// 账号不存在时用于比对的摘要，首次使用时按 HASH_COST 计算
static DUMMY_DIGEST: OnceLock<String> = OnceLock::new();

/// 对密码进行哈希处理
///
/// 使用 bcrypt 算法生成密码哈希
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    hash(password, HASH_COST).map_err(|e| ApiError::Internal(format!("密码哈希失败: {}", e)))
}

/// 验证密码
///
/// 比较明文密码与存储的哈希值，摘要格式损坏时返回错误而非 false
pub fn verify_password(password: &str, hash: &str) -> Result<bool, ApiError> {
    verify(password, hash).map_err(|e| ApiError::Internal(format!("密码验证失败: {}", e)))
}

/// 校验登录凭据
///
/// 账号不存在（`digest` 为 None）时仍对占位摘要执行一次 bcrypt 校验并返回 false，
/// 使两种失败路径耗时一致
pub fn verify_credentials(password: &str, digest: Option<&str>) -> Result<bool, ApiError> {
    match digest {
        Some(digest) => verify_password(password, digest),
        None => {
            verify_password(password, dummy_digest()?)?;
            Ok(false)
        }
    }
}

fn dummy_digest() -> Result<&'static str, ApiError> {
    if let Some(digest) = DUMMY_DIGEST.get() {
        return Ok(digest);
    }
    let digest = hash_password("bookmarket-absent-account")?;
    Ok(DUMMY_DIGEST.get_or_init(|| digest))
}

/// 占位摘要是否已计算
#[cfg(test)]
pub(crate) fn dummy_digest_ready() -> bool {
    DUMMY_DIGEST.get().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "test_password_123";
        let hashed = hash_password(password).unwrap();

        assert_ne!(hashed, password);
        assert!(verify_password(password, &hashed).unwrap());
        assert!(!verify_password("wrong_password", &hashed).unwrap());
    }

    #[test]
    fn test_corrupt_digest_is_error() {
        let result = verify_password("anything", "not-a-bcrypt-digest");
        assert!(matches!(result, Err(ApiError::Internal(_))));
    }

    #[test]
    fn test_verify_credentials_without_account() {
        assert!(!verify_credentials("bookmarket-absent-account", None).unwrap());
        assert!(dummy_digest_ready());
    }

    #[test]
    fn test_verify_credentials_with_digest() {
        let hashed = hash_password("pw-123").unwrap();
        assert!(verify_credentials("pw-123", Some(&hashed)).unwrap());
        assert!(!verify_credentials("pw-124", Some(&hashed)).unwrap());
    }
}
