//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use axum::{
    Router, middleware,
    routing::{get, post},
};

use bookmarket_shared::database::Database;

use crate::{handlers, middleware::auth_middleware, state::AppState};

/// 构建存活与就绪检查路由（无 /v1 前缀，无需认证）
///
/// `db` 为 None 表示使用内存存储
pub fn health_routes(db: Option<Database>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .with_state(db)
}

/// 构建认证相关的路由（公开路由，无需认证）
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(handlers::auth::login))
}

/// 构建图书路由
///
/// GET 公开，其余方法由认证中间件保护
pub fn book_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/books",
            get(handlers::book::list_books).post(handlers::book::create_book),
        )
        .route(
            "/books/{id}",
            get(handlers::book::get_book)
                .put(handlers::book::update_book)
                .delete(handlers::book::delete_book),
        )
}

/// 构建用户路由
///
/// POST（注册）公开，其余方法由认证中间件保护
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(handlers::user::list_users).post(handlers::user::create_user),
        )
        .route(
            "/users/{id}",
            get(handlers::user::get_user)
                .put(handlers::user::update_user)
                .delete(handlers::user::delete_user),
        )
}

/// 构建完整的 API 路由（不含 /v1 前缀）
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(book_routes())
        .merge(user_routes())
}

/// 组装带 /v1 前缀与认证中间件的应用路由
///
/// 中间件挂在外层路由上，按完整路径判断是否需要认证
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .nest("/v1", api_routes())
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
