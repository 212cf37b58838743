use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

/// Category row. `slug` is the public lookup key, `id` is internal.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub parent_id: Option<i64>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Writable category fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInput {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub parent_id: Option<i64>,
}
