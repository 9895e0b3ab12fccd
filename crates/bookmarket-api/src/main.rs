//! 图书市场 REST API 服务入口

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::{self, Next},
    response::Response,
};
use bookmarket_api::{
    AppState, JwtConfig, MIGRATOR, SERVICE_NAME,
    middleware::with_request_timeout,
    repository::{MemoryBookRepository, MemoryUserRepository, PgUserRepository},
    routes,
};
use bookmarket_shared::{
    config::{AppConfig, StorageBackend},
    database::Database,
    observability::{self, middleware as obs_middleware},
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 配置无法解析时拒绝启动，避免以默认配置（开发密钥）对外服务
    let config = AppConfig::load(SERVICE_NAME)?;

    let _guard = observability::init(&config.service_name, &config.observability).await?;

    info!(
        environment = %config.environment,
        backend = ?config.storage.backend,
        "Starting {} on {}",
        config.service_name,
        config.server_addr()
    );

    let jwt_config = JwtConfig::from_app_config(&config)?;

    // 图书集合始终在进程内，用户存储按配置选择
    let books = Arc::new(MemoryBookRepository::with_sample_book());
    let (state, db) = match config.storage.backend {
        StorageBackend::Postgres => {
            let db = Database::connect_and_migrate(&config.database, &MIGRATOR).await?;
            let users = Arc::new(PgUserRepository::new(db.pool().clone()));
            (AppState::new(users, books, jwt_config), Some(db))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory user store, data is lost on restart");
            let users = Arc::new(MemoryUserRepository::new());
            (AppState::new(users, books, jwt_config), None)
        }
    };

    let request_timeout = Duration::from_secs(config.server.request_timeout_secs);

    let app = routes::health_routes(db.clone()).merge(routes::build_router(state));
    let app = with_request_timeout(app, request_timeout)
        .layer(middleware::from_fn(security_headers))
        .layer(build_cors(&config))
        // 可观测性中间件：请求追踪和指标收集
        .layer(middleware::from_fn(obs_middleware::http_tracing))
        .layer(middleware::from_fn(obs_middleware::request_id));

    let listener = TcpListener::bind(config.server_addr()).await?;
    info!("Listening on {}", config.server_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(db) = db {
        db.close().await;
    }

    info!("Server shutdown complete");

    Ok(())
}

/// CORS 配置：cors_origins 为逗号分隔的来源列表，"*" 表示任意来源
fn build_cors(config: &AppConfig) -> CorsLayer {
    let allowed_origins = if config.cors_origins.is_empty() {
        "http://localhost:3000,http://localhost:5173"
    } else {
        config.cors_origins.as_str()
    };

    if allowed_origins == "*" {
        if config.is_production() {
            warn!("cors_origins=\"*\" is unsafe in production, configure explicit origins");
        }
        info!("CORS allowed_origins: * (all origins)");
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    info!("CORS allowed_origins: {}", allowed_origins);
    let origins: Vec<_> = allowed_origins
        .split(',')
        .filter_map(|s| s.trim().parse::<HeaderValue>().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// 为所有响应注入 HTTP 安全头
async fn security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert("x-content-type-options", HeaderValue::from_static("nosniff"));
    headers.insert("x-frame-options", HeaderValue::from_static("DENY"));
    headers.insert(
        "strict-transport-security",
        HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );
    // 旧版 XSS 过滤器显式关闭
    headers.insert("x-xss-protection", HeaderValue::from_static("0"));
    response
}

/// 监听关闭信号
///
/// 收到 Ctrl+C 或 SIGTERM 后返回，触发 axum 的优雅关闭流程
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown..."),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown..."),
    }
}
