//! 领域模型模块

pub mod book;
pub mod user;

pub use book::{Book, BookChanges, SAMPLE_BOOK_ID};
pub use user::{User, UserChanges};
