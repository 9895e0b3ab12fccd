//! JWT 认证中间件
//!
//! 验证请求中的 Bearer Token 并将 Claims 注入请求扩展

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};

use crate::error::ApiError;
use crate::state::AppState;

/// 受保护的路由组及其豁免方法
///
/// 图书组的 GET 为公开读取，用户组的 POST 为注册入口
const GATED_GROUPS: &[(&str, &str)] = &[("/v1/books", "GET"), ("/v1/users", "POST")];

/// 判断请求是否需要认证
pub fn requires_auth(method: &Method, path: &str) -> bool {
    GATED_GROUPS
        .iter()
        .any(|(prefix, exempt)| in_group(path, prefix) && method.as_str() != *exempt)
}

fn in_group(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// 认证中间件
///
/// 缺少或格式错误的 Authorization 头返回 400，签名、过期或签发者校验失败返回 401。
/// 非受保护路由直接放行。
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if !requires_auth(request.method(), request.uri().path()) {
        return next.run(request).await;
    }

    let Some(Authorization(bearer)) = request.headers().typed_get::<Authorization<Bearer>>()
    else {
        return ApiError::MissingToken.into_response();
    };

    match state.jwt_manager.verify_token(bearer.token()) {
        Ok(claims) => {
            tracing::debug!(subject = %claims.sub, "Token accepted");
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Claims, JwtConfig, JwtManager};
    use axum::{Extension, Router, http::StatusCode, middleware, routing::get};
    use tower::ServiceExt;

    const SECRET: &str = "gate-test-secret";

    fn jwt_config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            ..JwtConfig::default()
        }
    }

    async fn whoami(Extension(claims): Extension<Claims>) -> String {
        claims.sub
    }

    fn gated_app() -> Router {
        let state = AppState::in_memory(jwt_config(SECRET));
        Router::new()
            .route("/v1/users", get(whoami).post(|| async { "signup" }))
            .route("/v1/books", get(|| async { "books" }))
            .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
            .with_state(state)
    }

    async fn call(app: Router, method: &str, uri: &str, auth: Option<String>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = auth {
            builder = builder.header("Authorization", value);
        }
        app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap()
    }

    async fn message_of(response: Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        value["message"].as_str().unwrap_or_default().to_string()
    }

    #[test]
    fn test_requires_auth_matrix() {
        assert!(!requires_auth(&Method::GET, "/v1/books"));
        assert!(!requires_auth(&Method::GET, "/v1/books/abc"));
        assert!(requires_auth(&Method::POST, "/v1/books"));
        assert!(requires_auth(&Method::PUT, "/v1/books/abc"));
        assert!(requires_auth(&Method::DELETE, "/v1/books/abc"));

        assert!(!requires_auth(&Method::POST, "/v1/users"));
        assert!(requires_auth(&Method::GET, "/v1/users"));
        assert!(requires_auth(&Method::GET, "/v1/users/abc"));
        assert!(requires_auth(&Method::PUT, "/v1/users/abc"));

        assert!(!requires_auth(&Method::POST, "/v1/login"));
        assert!(!requires_auth(&Method::GET, "/health"));
        assert!(!requires_auth(&Method::DELETE, "/v1/booksellers"));
    }

    #[tokio::test]
    async fn test_exempt_routes_pass_without_token() {
        let response = call(gated_app(), "GET", "/v1/books", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = call(gated_app(), "POST", "/v1/users", None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_header_is_bad_request() {
        let response = call(gated_app(), "GET", "/v1/users", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(message_of(response).await, "missing or malformed jwt");
    }

    #[tokio::test]
    async fn test_wrong_scheme_is_bad_request() {
        let response = call(
            gated_app(),
            "GET",
            "/v1/users",
            Some("Basic dXNlcjpwYXNz".to_string()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_garbage_and_foreign_tokens_are_unauthorized() {
        let response = call(
            gated_app(),
            "GET",
            "/v1/users",
            Some("Bearer not-a-jwt".to_string()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(message_of(response).await, "invalid or expired jwt");

        let (foreign, _) = JwtManager::new(jwt_config("another-secret"))
            .generate_token("user-1")
            .unwrap();
        let response = call(
            gated_app(),
            "GET",
            "/v1/users",
            Some(format!("Bearer {}", foreign)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_injects_claims() {
        let (token, _) = JwtManager::new(jwt_config(SECRET))
            .generate_token("user-42")
            .unwrap();

        let response = call(
            gated_app(),
            "GET",
            "/v1/users",
            Some(format!("Bearer {}", token)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"user-42");
    }
}
