//! Request-level error type and its JSON rendering.
//!
//! Every failure leaves the service as `{"error": <message>}`. Store and
//! internal failures are logged with their detail and answered with the
//! caller-facing message only.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadInput(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Request timed out")]
    Timeout,
    #[error("{message}")]
    Store {
        message: String,
        #[source]
        source: sqlx::Error,
    },
    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn bad_input(message: impl Into<String>) -> Self {
        Self::BadInput(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn store(message: impl Into<String>, source: sqlx::Error) -> Self {
        Self::Store {
            message: message.into(),
            source,
        }
    }

    pub fn internal(message: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::Internal {
            message: message.into(),
            source: source.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadInput(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Timeout => StatusCode::REQUEST_TIMEOUT,
            Self::Store { .. } | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Store { message, source } => {
                tracing::error!(error = %source, "{message}");
            }
            Self::Internal { message, source } => {
                tracing::error!(error = %source, "{message}");
            }
            _ => {}
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "rejected request body");
        Self::BadInput("Invalid request payload".into())
    }
}

/// Maps store results onto [`ApiError`], treating "no rows" as not found.
pub trait StoreResultExt<T> {
    fn or_not_found(self, not_found: &str, failure: &str) -> Result<T, ApiError>;
    fn or_store_failure(self, failure: &str) -> Result<T, ApiError>;
}

impl<T> StoreResultExt<T> for Result<T, sqlx::Error> {
    fn or_not_found(self, not_found: &str, failure: &str) -> Result<T, ApiError> {
        self.map_err(|e| match e {
            sqlx::Error::RowNotFound => ApiError::not_found(not_found),
            other => ApiError::store(failure, other),
        })
    }

    fn or_store_failure(self, failure: &str) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::store(failure, e))
    }
}

/// Parses a numeric path id, answering 400 with `message` otherwise.
pub fn parse_id(raw: &str, message: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| ApiError::bad_input(message))
}
