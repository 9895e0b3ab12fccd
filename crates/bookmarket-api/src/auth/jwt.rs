//! JWT Token 处理
//!
//! 提供 JWT Token 的生成和验证功能

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use bookmarket_shared::config::AppConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ApiError;

/// 未配置密钥时使用的开发默认值
pub const DEFAULT_DEV_SECRET: &str = "bookmarket-dev-secret-change-in-production";

/// JWT 配置
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// 签名密钥
    pub secret: String,
    /// Token 过期时间（秒）
    pub expires_in_secs: i64,
    /// Token 签发者
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_DEV_SECRET.to_string(),
            expires_in_secs: 86400, // 24 小时
            issuer: "bookmarket".to_string(),
        }
    }
}

impl JwtConfig {
    /// 从应用配置构造
    ///
    /// 生产环境必须显式配置密钥（auth.jwt_secret 或 JWT_SECRET），其余环境回退到开发默认值
    pub fn from_app_config(config: &AppConfig) -> anyhow::Result<Self> {
        let secret = if config.auth.jwt_secret.is_empty() {
            if config.is_production() {
                anyhow::bail!("JWT secret must be set in production (auth.jwt_secret or JWT_SECRET)");
            }
            warn!("Using default JWT secret - set JWT_SECRET for production");
            DEFAULT_DEV_SECRET.to_string()
        } else {
            config.auth.jwt_secret.clone()
        };

        Ok(Self {
            secret,
            expires_in_secs: config.auth.expires_in_secs,
            issuer: config.auth.issuer.clone(),
        })
    }
}

/// JWT Claims（Token 载荷）
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// 用户 ID
    pub sub: String,
    /// 签发时间
    pub iat: i64,
    /// 过期时间
    pub exp: i64,
    /// 签发者
    pub iss: String,
}

/// JWT 管理器
#[derive(Clone)]
pub struct JwtManager {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    /// 创建 JWT 管理器
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// 为用户签发 Token
    ///
    /// 返回 Token 及其过期时间戳
    pub fn generate_token(&self, user_id: &str) -> Result<(String, i64), ApiError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.config.expires_in_secs);

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: self.config.issuer.clone(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ApiError::Internal(format!("JWT 生成失败: {}", e)))?;

        Ok((token, exp.timestamp()))
    }

    /// 验证并解析 JWT Token
    ///
    /// 签名错误、过期、签发者不符都归为 InvalidToken
    pub fn verify_token(&self, token: &str) -> Result<Claims, ApiError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token expired");
                    }
                    kind => tracing::debug!(reason = ?kind, "Token rejected"),
                }
                ApiError::InvalidToken
            })?;

        Ok(token_data.claims)
    }
}
