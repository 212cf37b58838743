use axum::{
    extract::{FromRef, State},
    routing::post,
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse},
        jwt::JwtKeys,
        password::verify_password,
        repo_types::User,
    },
    error::{ApiError, StoreResultExt},
    extract::ApiJson,
    state::AppState,
};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(ApiError::bad_input("Invalid request payload"));
    }

    let user = User::find_by_username(&state.db, &payload.username)
        .await
        .or_store_failure("Failed to look up user")?
        .ok_or_else(|| {
            warn!(username = %payload.username, "login unknown username");
            ApiError::unauthorized(INVALID_CREDENTIALS)
        })?;

    // Hash comparison runs on the blocking pool.
    let plain = payload.password;
    let stored = user.password_hash.clone();
    let ok = tokio::task::spawn_blocking(move || verify_password(&plain, &stored))
        .await
        .map_err(|e| ApiError::internal("Failed to verify credentials", e))?
        .unwrap_or_else(|e| {
            error!(error = %e, user_id = user.id, "stored password hash is unreadable");
            false
        });

    if !ok {
        warn!(username = %user.username, user_id = user.id, "login invalid password");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys
        .sign(&user.username)
        .map_err(|e| ApiError::internal("Could not generate token", e))?;

    info!(username = %user.username, user_id = user.id, "user logged in");
    Ok(Json(LoginResponse { token }))
}
