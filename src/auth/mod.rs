use crate::state::AppState;
use axum::Router;

mod claims;
mod dto;
pub mod extractors;
pub mod handlers;
pub mod jwt;
pub mod password;
pub mod repo;
pub mod repo_types;

pub use claims::Claims;
pub use extractors::{require_auth, AuthUser};
pub use jwt::JwtKeys;

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
