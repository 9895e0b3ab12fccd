//! 用户仓储
//!
//! 基于 PostgreSQL 的凭据存储

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use super::traits::UserRepositoryTrait;
use crate::error::{ApiError, Result};
use crate::models::{User, UserChanges};

/// PostgreSQL 用户仓储
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepositoryTrait for PgUserRepository {
    async fn list(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, fullname, email, password, created_at, updated_at
            FROM users
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, fullname, email, password, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, fullname, email, password, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert(&self, user: User) -> Result<User> {
        let inserted = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, fullname, email, password, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, fullname, email, password, created_at, updated_at
            "#,
        )
        .bind(&user.id)
        .bind(&user.fullname)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            // users_email_key 唯一索引兜底并发注册
            sqlx::Error::Database(ref db) if db.is_unique_violation() => ApiError::DuplicateEmail,
            other => ApiError::Database(other),
        })?;

        Ok(inserted)
    }

    async fn update(&self, id: &str, changes: UserChanges) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET fullname = $2,
                password = COALESCE($3, password),
                updated_at = $4
            WHERE id = $1
            RETURNING id, fullname, email, password, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&changes.fullname)
        .bind(changes.password_digest.as_deref())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
