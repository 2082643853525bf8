//! HTTP session bound to one booking API instance
//!
//! A [`Session`] owns the HTTP client, the resolved base URL, the default
//! headers and, once authenticated, the auth token. Its lifecycle is:
//!
//! ```text
//! open ──► Opened ──authenticate──► Authenticated
//!             │                          │
//!             └────────close─────────────┴──► Closed
//! ```
//!
//! `close` is idempotent and also runs on drop, so a session is released even
//! when a test panics. Every operation on a closed session fails with
//! [`Error::SessionClosed`].

use std::fmt;

use http::{HeaderMap, HeaderName, HeaderValue, Method, header::ACCEPT};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use crate::{
    config::{Config, Credentials},
    error::{Error, Result},
    http::RequestBuilder,
    observability::log_session_transition,
    resources::Bookings,
};

/// Lifecycle state of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Client created, no token yet
    Opened,
    /// Token obtained and stored
    Authenticated,
    /// Client released; terminal
    Closed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Opened => "opened",
            SessionState::Authenticated => "authenticated",
            SessionState::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Authenticated-or-not HTTP context shared by all tests of a fixture.
///
/// Requests take `&Session`, so concurrent requests from one test are fine;
/// authenticating and closing take `&mut Session`.
pub struct Session {
    http_client: Option<reqwest::Client>,
    base_url: Url,
    default_headers: HeaderMap,
    auth_token: Option<SecretString>,
    state: SessionState,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url.as_str())
            .field("state", &self.state)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Session {
    /// Open a session against the configured base URL, honouring the
    /// `BOOKER_BASE_URL` override.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the resolved base URL is not an
    /// absolute `http`/`https` URL.
    pub fn open(config: &Config) -> Result<Self> {
        Self::builder().base_url(config.resolved_base_url()).open()
    }

    /// Start building a session with explicit settings.
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// True once a token has been stored and the session is still open.
    pub fn is_authenticated(&self) -> bool {
        self.state == SessionState::Authenticated
    }

    /// True after [`close`](Self::close).
    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }

    /// Base URL every request path is resolved against.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Headers sent with every request.
    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    /// The stored auth token, if any.
    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_ref().map(|t| t.expose_secret())
    }

    /// The `Cookie` header value carrying the token: `token=<token>`.
    ///
    /// # Errors
    ///
    /// [`Error::SessionClosed`] after close, [`Error::NotAuthenticated`]
    /// before a token was obtained.
    pub fn auth_cookie(&self) -> Result<String> {
        self.ensure_open()?;
        self.auth_token()
            .map(|token| format!("token={}", token))
            .ok_or(Error::NotAuthenticated)
    }

    /// Obtain and store a token with the given credentials.
    ///
    /// See [`auth::authenticate`](crate::auth::authenticate).
    pub async fn authenticate(&mut self, credentials: &Credentials) -> Result<String> {
        crate::auth::authenticate(self, credentials).await
    }

    /// Resolve `path` against the base URL.
    ///
    /// Paths are relative to the base URL's path, so a base of
    /// `http://host/api` turns `/booking` into `http://host/api/booking`.
    pub fn url_for(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::InvalidUrl(format!("cannot resolve '{}': {}", path, e)))
    }

    /// Start a request with an arbitrary method.
    ///
    /// The builder borrows the session, so it must be sent or dropped before
    /// [`close`](Self::close).
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder<'_>> {
        let client = self.http_client.as_ref().ok_or(Error::SessionClosed)?;
        Ok(RequestBuilder::new(client, method, self.url_for(path)?))
    }

    /// Start a request that carries the auth cookie.
    pub fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder<'_>> {
        let cookie = self.auth_cookie()?;
        self.request(method, path)?.header("Cookie", cookie)
    }

    /// Start a `GET` request.
    pub fn get(&self, path: &str) -> Result<RequestBuilder<'_>> {
        self.request(Method::GET, path)
    }

    /// Start a `POST` request.
    pub fn post(&self, path: &str) -> Result<RequestBuilder<'_>> {
        self.request(Method::POST, path)
    }

    /// Start a `PUT` request.
    pub fn put(&self, path: &str) -> Result<RequestBuilder<'_>> {
        self.request(Method::PUT, path)
    }

    /// Start a `PATCH` request.
    pub fn patch(&self, path: &str) -> Result<RequestBuilder<'_>> {
        self.request(Method::PATCH, path)
    }

    /// Start a `DELETE` request.
    pub fn delete(&self, path: &str) -> Result<RequestBuilder<'_>> {
        self.request(Method::DELETE, path)
    }

    /// Booking endpoints.
    pub fn bookings(&self) -> Bookings<'_> {
        Bookings::new(self)
    }

    /// Release the client and the token. Calling it again does nothing.
    pub fn close(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }
        let from = self.state;
        self.http_client = None;
        self.auth_token = None;
        self.state = SessionState::Closed;
        log_session_transition(self.base_url.as_str(), &from.to_string(), "closed");
    }

    pub(crate) fn ensure_open(&self) -> Result<()> {
        if self.state == SessionState::Closed {
            Err(Error::SessionClosed)
        } else {
            Ok(())
        }
    }

    pub(crate) fn store_token(&mut self, token: String) {
        self.auth_token = Some(SecretString::new(token.into_boxed_str()));
        self.state = SessionState::Authenticated;
        log_session_transition(self.base_url.as_str(), "opened", "authenticated");
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}

/// Builder for [`Session`].
#[derive(Debug, Default)]
pub struct SessionBuilder {
    base_url: Option<String>,
    default_headers: HeaderMap,
}

impl SessionBuilder {
    /// Set the base URL. Defaults to the public restful-booker instance.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a header sent with every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn header(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let key_str = key.as_ref();
        let value_str = value.as_ref();

        let key = key_str
            .parse::<HeaderName>()
            .map_err(|e| Error::InvalidHeaderName(format!("'{}': {}", key_str, e)))?;
        let value = value_str
            .parse::<HeaderValue>()
            .map_err(|e| Error::InvalidHeaderValue(format!("header '{}': {}", key_str, e)))?;

        self.default_headers.insert(key, value);
        Ok(self)
    }

    /// Open the session.
    ///
    /// `Accept: application/json` is always part of the default headers.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The base URL is empty, unparsable, or not `http`/`https`
    /// - HTTP client creation fails
    pub fn open(self) -> Result<Session> {
        let Self {
            base_url,
            mut default_headers,
        } = self;

        let base_url_string = base_url.unwrap_or_else(|| crate::DEFAULT_BASE_URL.to_string());
        if base_url_string.trim().is_empty() {
            return Err(Error::InvalidUrl("Base URL cannot be empty".to_string()));
        }

        let mut base_url: Url = base_url_string
            .trim()
            .parse()
            .map_err(|e| Error::InvalidUrl(format!("'{}': {}", base_url_string, e)))?;

        match base_url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(Error::InvalidUrl(format!(
                    "Invalid URL scheme '{}'. Only 'http' and 'https' are supported.",
                    scheme
                )));
            }
        }

        // Paths are joined relative to the base, which needs a trailing slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .user_agent(format!("turbobooker-rust/{}", crate::VERSION))
            .default_headers(default_headers.clone())
            .build()
            .map_err(|e| Error::HttpClient(e.to_string()))?;

        debug!(base_url = %base_url, "Session opened");

        Ok(Session {
            http_client: Some(http_client),
            base_url,
            default_headers,
            auth_token: None,
            state: SessionState::Opened,
        })
    }
}
