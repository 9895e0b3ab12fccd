//! 图书仓储
//!
//! 进程内有序集合，所有读改写序列在同一次加锁内完成

use async_trait::async_trait;
use parking_lot::Mutex;

use super::traits::BookRepositoryTrait;
use crate::error::Result;
use crate::models::{Book, BookChanges};

/// 内存图书仓储
#[derive(Debug, Default)]
pub struct MemoryBookRepository {
    books: Mutex<Vec<Book>>,
}

impl MemoryBookRepository {
    /// 创建空集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建包含示例图书的集合
    pub fn with_sample_book() -> Self {
        Self::with_books(vec![Book::sample()])
    }

    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: Mutex::new(books),
        }
    }
}

#[async_trait]
impl BookRepositoryTrait for MemoryBookRepository {
    async fn list(&self) -> Result<Vec<Book>> {
        Ok(self.books.lock().clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Book>> {
        Ok(self.books.lock().iter().find(|b| b.id == id).cloned())
    }

    async fn insert(&self, book: Book) -> Result<Book> {
        self.books.lock().push(book.clone());
        Ok(book)
    }

    async fn update(&self, id: &str, changes: BookChanges) -> Result<Option<Book>> {
        let mut books = self.books.lock();

        let Some(index) = books.iter().position(|b| b.id == id) else {
            return Ok(None);
        };

        // 取出旧条目后重新追加到末尾
        let updated = books.remove(index).revised(changes);
        books.push(updated.clone());

        Ok(Some(updated))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut books = self.books.lock();

        match books.iter().position(|b| b.id == id) {
            Some(index) => {
                books.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
