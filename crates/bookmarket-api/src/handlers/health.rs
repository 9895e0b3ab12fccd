//! 存活与就绪检查

use axum::{Json, extract::State};
use bookmarket_shared::database::Database;
use serde_json::{Value, json};

use crate::SERVICE_NAME;

/// 存活检查
///
/// GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME
    }))
}

/// 就绪检查
///
/// GET /ready
///
/// 使用 PostgreSQL 存储时检查连接，内存存储直接报告 "memory"
pub async fn readiness_check(State(db): State<Option<Database>>) -> Json<Value> {
    let database = match &db {
        Some(db) if db.is_ready().await => "ok",
        Some(_) => "fail",
        None => "memory",
    };

    Json(json!({
        "status": if database == "fail" { "degraded" } else { "ok" },
        "service": SERVICE_NAME,
        "checks": {
            "database": database
        }
    }))
}
