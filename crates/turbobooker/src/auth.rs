//! Token authentication
//!
//! `POST /auth` with `{"username", "password"}` answers `200 {"token": "..."}`
//! on success. Bad credentials also answer 200, with `{"reason": "Bad
//! credentials"}` and no token, so a missing token is treated as rejection.

use secrecy::ExposeSecret;
use tracing::{info, warn};
use turbobooker_protocol::{AuthRequest, AuthResponse};

use crate::{
    AUTH_PATH,
    config::Credentials,
    error::{Error, Result},
    session::{Session, SessionState},
};

/// Exchange credentials for a token and store it on the session.
///
/// Returns the token. On failure nothing is stored and the session stays
/// `Opened`.
///
/// # Errors
///
/// - [`Error::SessionClosed`] if the session was closed
/// - [`Error::AlreadyAuthenticated`] if a token is already stored
/// - [`Error::Authentication`] if the request fails, the status is not 2xx,
///   or the response carries no token
pub async fn authenticate(session: &mut Session, credentials: &Credentials) -> Result<String> {
    match session.state() {
        SessionState::Closed => return Err(Error::SessionClosed),
        SessionState::Authenticated => return Err(Error::AlreadyAuthenticated),
        SessionState::Opened => {}
    }

    let body = AuthRequest {
        username: &credentials.username,
        password: credentials.password.expose_secret(),
    };

    let response = session
        .post(AUTH_PATH)?
        .json(&body)?
        .send()
        .await
        .map_err(|e| Error::Authentication(format!("{} request failed: {}", AUTH_PATH, e)))?;

    if !response.ok() {
        warn!(status = response.status().as_u16(), "Authentication rejected");
        return Err(Error::Authentication(format!(
            "{} returned status {}: {}",
            AUTH_PATH,
            response.status().as_u16(),
            response.text()
        )));
    }

    let parsed: AuthResponse = response
        .json()
        .map_err(|e| Error::Authentication(format!("undecodable {} response: {}", AUTH_PATH, e)))?;

    let token = match parsed.token() {
        Some(token) => token.to_string(),
        None => {
            let reason = parsed
                .reason
                .unwrap_or_else(|| "response carried no token".to_string());
            warn!(reason = %reason, "Authentication rejected");
            return Err(Error::Authentication(reason));
        }
    };

    session.store_token(token.clone());
    info!(username = %credentials.username, "Authenticated");
    Ok(token)
}
