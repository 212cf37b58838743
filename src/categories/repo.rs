use sqlx::PgPool;

use super::repo_types::{Category, CategoryInput};

impl Category {
    /// All categories, ordered by id. Unpaginated.
    pub async fn list(db: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, slug, description, parent_id, created_at
            FROM categories
            ORDER BY id ASC
            "#,
        )
        .fetch_all(db)
        .await
    }

    /// Fails with `RowNotFound` when the id is unknown.
    pub async fn get_by_id(db: &PgPool, id: i64) -> Result<Category, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, slug, description, parent_id, created_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(db)
        .await
    }

    /// Fails with `RowNotFound` when the slug is unknown.
    pub async fn get_by_slug(db: &PgPool, slug: &str) -> Result<Category, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, slug, description, parent_id, created_at
            FROM categories
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_one(db)
        .await
    }

    pub async fn create(db: &PgPool, input: &CategoryInput) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO categories (name, slug, description, parent_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&input.name)
        .bind(&input.slug)
        .bind(&input.description)
        .bind(input.parent_id)
        .fetch_one(db)
        .await
    }

    /// Full replace of the writable fields. Returns `false` if no row has `id`.
    pub async fn update(db: &PgPool, id: i64, input: &CategoryInput) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE categories
               SET name = $1, slug = $2, description = $3, parent_id = $4
             WHERE id = $5
            "#,
        )
        .bind(&input.name)
        .bind(&input.slug)
        .bind(&input.description)
        .bind(input.parent_id)
        .bind(id)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Unconditional delete; deleting an unknown id is not an error.
    pub async fn delete(db: &PgPool, id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}
