use sqlx::PgPool;

use super::{
    repo_types::{Article, ArticleInput},
    search::{SearchTerm, SEARCH_COUNT_SQL, SEARCH_PAGE_SQL},
};
use crate::pagination::{Page, PageParams};

// Every paginated read below issues the page query and the count query as
// two independent round trips.

impl Article {
    /// Newest first; the total is over the whole table.
    pub async fn list(db: &PgPool, params: PageParams) -> Result<Page<Article>, sqlx::Error> {
        let items = sqlx::query_as::<_, Article>(
            r#"
            SELECT id, title, content, category_id, author, source, created_at, updated_at
            FROM articles
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(db)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles")
            .fetch_one(db)
            .await?;

        Ok(Page { items, total })
    }

    /// Fails with `RowNotFound` when the id is unknown.
    pub async fn get(db: &PgPool, id: i64) -> Result<Article, sqlx::Error> {
        sqlx::query_as::<_, Article>(
            r#"
            SELECT id, title, content, category_id, author, source, created_at, updated_at
            FROM articles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(db)
        .await
    }

    pub async fn list_by_category(
        db: &PgPool,
        category_id: i64,
        params: PageParams,
    ) -> Result<Page<Article>, sqlx::Error> {
        let items = sqlx::query_as::<_, Article>(
            r#"
            SELECT id, title, content, category_id, author, source, created_at, updated_at
            FROM articles
            WHERE category_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(category_id)
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(db)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles WHERE category_id = $1")
            .bind(category_id)
            .fetch_one(db)
            .await?;

        Ok(Page { items, total })
    }

    /// Highest `ts_rank` first. Equal ranks have no defined order.
    pub async fn search(
        db: &PgPool,
        term: &SearchTerm,
        params: PageParams,
    ) -> Result<Page<Article>, sqlx::Error> {
        let items = sqlx::query_as::<_, Article>(SEARCH_PAGE_SQL)
            .bind(term.as_str())
            .bind(params.limit())
            .bind(params.offset())
            .fetch_all(db)
            .await?;

        let total: i64 = sqlx::query_scalar(SEARCH_COUNT_SQL)
            .bind(term.as_str())
            .fetch_one(db)
            .await?;

        Ok(Page { items, total })
    }

    /// Inserts and returns the store-assigned id. An absent category is
    /// stored as `NULL`.
    pub async fn create(db: &PgPool, input: &ArticleInput) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO articles (title, content, category_id, author, source)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&input.title)
        .bind(&input.content)
        .bind(input.category_id)
        .bind(&input.author)
        .bind(&input.source)
        .fetch_one(db)
        .await
    }

    /// Full replace of the writable fields; `updated_at` is set by the store.
    /// Returns `false` if no row has `id`.
    pub async fn update(db: &PgPool, id: i64, input: &ArticleInput) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE articles
               SET title = $1, content = $2, category_id = $3, author = $4, source = $5,
                   updated_at = now()
             WHERE id = $6
            "#,
        )
        .bind(&input.title)
        .bind(&input.content)
        .bind(input.category_id)
        .bind(&input.author)
        .bind(&input.source)
        .bind(id)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Unconditional delete; deleting an unknown id is not an error.
    pub async fn delete(db: &PgPool, id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}
