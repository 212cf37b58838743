use crate::auth::repo_types::User;
use sqlx::PgPool;

impl User {
    /// Find a user by username.
    pub async fn find_by_username(db: &PgPool, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await
    }

    /// Insert a user with an already hashed password, returning its id.
    pub async fn create(db: &PgPool, username: &str, password_hash: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(db)
        .await
    }
}
