//! 图书 HTTP 处理器
//!
//! 读取公开，写操作需要认证

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use bookmarket_shared::observability::metrics;
use tracing::info;

use super::parse_payload;
use crate::dto::{ApiResponse, BookPayload};
use crate::error::{ApiError, Result};
use crate::models::{Book, BookChanges};
use crate::state::AppState;

/// 获取图书列表
///
/// GET /v1/books
///
/// 集合为空时返回 400，data 为空数组
pub async fn list_books(State(state): State<AppState>) -> Result<ApiResponse<Vec<Book>>> {
    let books = state.books.list().await?;

    if books.is_empty() {
        return Err(ApiError::BooksUnavailable);
    }

    Ok(ApiResponse::ok("List of books", books))
}

/// 获取图书详情
///
/// GET /v1/books/{id}
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Book>> {
    let book = state
        .books
        .find_by_id(&id)
        .await?
        .ok_or(ApiError::BookNotFound(id))?;

    Ok(ApiResponse::ok("List of books", book))
}

/// 创建图书
///
/// POST /v1/books
pub async fn create_book(
    State(state): State<AppState>,
    payload: std::result::Result<Json<BookPayload>, JsonRejection>,
) -> Result<ApiResponse<Book>> {
    let req = parse_payload(payload, "Create book failed")?;

    let book = state.books.insert(Book::new(req.name, req.author)).await?;
    metrics::record_book_created();
    info!(book_id = %book.id, "Book created");

    Ok(ApiResponse::created("Book has been created", book))
}

/// 更新图书
///
/// PUT /v1/books/{id}
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<BookPayload>, JsonRejection>,
) -> Result<ApiResponse<Book>> {
    let req = parse_payload(payload, "Update book failed")?;

    let changes = BookChanges {
        name: req.name,
        author: req.author,
    };
    let book = state
        .books
        .update(&id, changes)
        .await?
        .ok_or(ApiError::BookNotFound(id))?;
    info!(book_id = %book.id, "Book updated");

    Ok(ApiResponse::ok("Book has been updated", book))
}

/// 删除图书
///
/// DELETE /v1/books/{id}
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>> {
    if !state.books.delete(&id).await? {
        return Err(ApiError::BookNotFound(id));
    }
    info!(book_id = %id, "Book deleted");

    Ok(ApiResponse::empty("Book has been deleted"))
}
