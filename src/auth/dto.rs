use serde::{Deserialize, Serialize};

/// Request body for login. Fields default to empty so that a missing field
/// is reported as a bad payload rather than a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}
