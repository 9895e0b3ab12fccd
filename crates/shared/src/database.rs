//! 用户凭据库连接管理
//!
//! 封装 PostgreSQL 连接池：建连、执行内嵌迁移、就绪检查与关闭。

use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, instrument, warn};

use crate::config::DatabaseConfig;
use crate::error::Result;

/// 数据库连接池包装
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// 建立连接池并执行迁移
    ///
    /// 迁移目录由调用方通过 `sqlx::migrate!` 在编译期嵌入，迁移失败时不返回连接池
    #[instrument(skip_all, fields(max_connections = config.max_connections))]
    pub async fn connect_and_migrate(config: &DatabaseConfig, migrator: &Migrator) -> Result<Self> {
        let db = Self::connect(config).await?;

        let known = migrator.iter().count();
        migrator.run(&db.pool).await?;
        info!(migrations = known, "Database schema up to date");

        Ok(db)
    }

    /// 创建数据库连接池
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect(&config.url)
            .await?;

        info!("Database connection pool created");
        Ok(Self { pool })
    }

    /// 获取连接池引用
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// 就绪检查，连接不可用时返回 false
    pub async fn is_ready(&self) -> bool {
        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Database readiness check failed");
                false
            }
        }
    }

    /// 关闭连接池
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}
