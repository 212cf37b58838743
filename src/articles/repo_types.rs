use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

/// Article row. `category_id` is `null` in JSON when the article has no
/// category.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq, Eq)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category_id: Option<i64>,
    pub author: String,
    pub source: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Writable article fields; timestamps and id belong to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleInput {
    pub title: String,
    pub content: String,
    pub category_id: Option<i64>,
    pub author: String,
    pub source: String,
}
