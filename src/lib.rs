//! Articles and categories content backend: public paginated reads and
//! full-text search, plus an authenticated admin CRUD surface, on PostgreSQL.

pub mod app;
pub mod articles;
pub mod auth;
pub mod categories;
pub mod config;
pub mod error;
pub mod extract;
pub mod nullable;
pub mod pagination;
pub mod state;

pub use state::AppState;

/// Migrations embedded from `./migrations`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
