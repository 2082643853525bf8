//! Authentication payloads for `POST /auth`

use serde::{Deserialize, Serialize};

/// Body of `POST /auth`.
///
/// Borrows the credentials so callers can keep the password behind a secret
/// wrapper until the moment of serialization.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AuthRequest<'a> {
    /// Account name
    pub username: &'a str,
    /// Account password
    pub password: &'a str,
}

/// Response body of `POST /auth`.
///
/// The API answers `200 {"token": "..."}` on success and
/// `200 {"reason": "Bad credentials"}` when the credentials are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    /// Session token
    #[serde(default)]
    pub token: Option<String>,

    /// Rejection reason
    #[serde(default)]
    pub reason: Option<String>,
}

impl AuthResponse {
    /// The token, if the API returned a non-empty one.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}
