//! 图书模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 启动时预置的示例图书 ID
pub const SAMPLE_BOOK_ID: &str = "6d55b8f0-df37-4c38-9e5b-e780bba68381";

/// 图书实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub name: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// 创建新图书，生成 ID 与时间戳
    pub fn new(name: impl Into<String>, author: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            author: author.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// 预置示例图书
    pub fn sample() -> Self {
        Self {
            id: SAMPLE_BOOK_ID.to_string(),
            ..Self::new("Automic Habbits", "James Clear")
        }
    }

    /// 应用变更，保留 ID 与创建时间
    pub fn revised(&self, changes: BookChanges) -> Self {
        Self {
            id: self.id.clone(),
            name: changes.name,
            author: changes.author,
            created_at: self.created_at,
            updated_at: Utc::now(),
        }
    }
}

/// 图书可变更字段
#[derive(Debug, Clone, PartialEq)]
pub struct BookChanges {
    pub name: String,
    pub author: String,
}
