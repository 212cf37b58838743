use axum::extract::FromRequest;

use crate::error::ApiError;

/// `Json` whose rejection renders as a 400 `{"error": ...}` body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
