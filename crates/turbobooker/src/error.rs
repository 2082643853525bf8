//! Error types for the booking harness
//!
//! One enum covers every failure the harness can surface, grouped the same way
//! test code reacts to them:
//!
//! - configuration and authentication failures stop the suite before any
//!   test runs ([`Error::is_fatal`]);
//! - transport, status and decode failures fail the calling test;
//! - sampling constraint violations fail the calling test with the pool size;
//! - schema violations are *not* errors, they are collected in a
//!   [`ValidationReport`](crate::schema::ValidationReport).
//!
//! Nothing in the harness retries.

use thiserror::Error;
use turbobooker_protocol::ProtocolError;

/// Result type alias for harness operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the booking harness.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration resource missing, unreadable or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credentials rejected, or `/auth` answered without a token.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The session already holds a token; tokens are never refreshed mid-run.
    #[error("Session is already authenticated")]
    AlreadyAuthenticated,

    /// A mutating call was attempted before `authenticate`.
    #[error("Session is not authenticated")]
    NotAuthenticated,

    /// Any operation after `close`.
    #[error("Session is already closed")]
    SessionClosed,

    /// The API answered with a non-success status where success was required.
    #[error("API error (status {status}): {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body as text
        body: String,
    },

    /// More unique booking ids were requested than the API holds.
    #[error("Booking list contains only {available} bookings. {requested} requested.")]
    SampleConstraint {
        /// Number of distinct ids available
        available: usize,
        /// Number of ids requested
        requested: usize,
    },

    /// No schema with this name exists in the schema store.
    #[error("Schema not found: {0}")]
    SchemaNotFound(String),

    /// The schema document itself is not valid JSON or not a valid schema.
    #[error("Invalid schema '{name}': {message}")]
    InvalidSchema {
        /// Schema reference as passed by the caller
        name: String,
        /// Reason the schema could not be compiled
        message: String,
    },

    /// Failed to decode a response body into a typed record.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Network or connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP client configuration or initialization error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Invalid HTTP header name.
    #[error("Invalid HTTP header name: {0}")]
    InvalidHeaderName(String),

    /// Invalid HTTP header value.
    #[error("Invalid HTTP header value: {0}")]
    InvalidHeaderValue(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build an [`Error::Api`] from a status code and body.
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Error::Api {
            status,
            body: body.into(),
        }
    }

    /// True for failures that prevent the suite from starting at all.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Config(_) | Error::Authentication(_) | Error::InvalidUrl(_)
        )
    }

    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Error::HttpClient(err.to_string())
        } else {
            Error::Connection(err.to_string())
        }
    }
}
