//! 数据访问层

mod book_repo;
mod memory_user_repo;
mod traits;
mod user_repo;

pub use book_repo::MemoryBookRepository;
pub use memory_user_repo::MemoryUserRepository;
pub use traits::{BookRepositoryTrait, UserRepositoryTrait};
pub use user_repo::PgUserRepository;

#[cfg(test)]
pub use traits::{MockBookRepositoryTrait, MockUserRepositoryTrait};
