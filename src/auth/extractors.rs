use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use super::jwt::JwtKeys;
use crate::error::ApiError;

/// Extracts and validates the bearer token, yielding the username.
#[derive(Debug, Clone)]
pub struct AuthUser(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Authorization header is required"))?;

        // Expect exactly "Bearer <token>"
        let token = match auth_header.split_once(' ') {
            Some(("Bearer", token)) if !token.is_empty() && !token.contains(' ') => token,
            _ => {
                return Err(ApiError::unauthorized(
                    "Authorization header format must be Bearer {token}",
                ))
            }
        };

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|e| {
            warn!(error = %e, "invalid or expired token");
            ApiError::unauthorized("Invalid or expired token")
        })?;

        Ok(AuthUser(claims.sub))
    }
}

/// Guards a whole router: requests without a valid token are refused before
/// any route-level extraction runs.
pub async fn require_auth(AuthUser(username): AuthUser, req: Request, next: Next) -> Response {
    debug!(%username, method = %req.method(), uri = %req.uri(), "admin request");
    next.run(req).await
}
