//! Configuration for the booking harness
//!
//! The configuration is a small JSON document:
//!
//! ```json
//! {
//!   "baseUrl": "https://restful-booker.herokuapp.com",
//!   "valid_user": { "username": "admin", "password": "password123" }
//! }
//! ```
//!
//! It is loaded once per suite and never mutated. The base URL can be
//! overridden at session-open time with `BOOKER_BASE_URL`, or with
//! `PLAYWRIGHT_BASE_URL` when the former is unset.

use std::path::Path;

use secrecy::SecretString;
use serde::Deserialize;

use crate::{
    BASE_URL_ENV, FALLBACK_BASE_URL_ENV, bundle,
    error::{Error, Result},
};

/// Name of the configuration resource inside the resource set.
pub const CONFIG_RESOURCE: &str = "test-data/config.json";

const BUNDLED_CONFIG: &str = include_str!("../resources/test-data/config.json");

/// Account used to obtain an auth token.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    /// Account name
    pub username: String,

    /// Account password
    pub password: SecretString,
}

impl Credentials {
    /// Create credentials from a username and password.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::new(password.into().into_boxed_str()),
        }
    }
}

/// Harness configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the booking API
    #[serde(rename = "baseUrl")]
    pub base_url: String,

    /// Credentials accepted by `/auth`
    pub valid_user: Credentials,
}

impl Config {
    /// Create a configuration directly.
    pub fn new(base_url: impl Into<String>, valid_user: Credentials) -> Self {
        Self {
            base_url: base_url.into(),
            valid_user,
        }
    }

    /// Parse a configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the document is not valid JSON, a field is
    /// missing, or the base URL or username is empty.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(raw)
            .map_err(|e| Error::Config(format!("Invalid configuration document: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration document from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read configuration from {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&raw)
    }

    /// Load a named document from the resource set (see [`bundle`]).
    pub fn load(resource: &str) -> Result<Self> {
        Self::from_json_str(&bundle::read_resource(resource)?)
    }

    /// The configuration compiled into the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED_CONFIG)
    }

    /// Load the suite configuration.
    ///
    /// Reads `test-data/config.json` from the resource set when a resource
    /// directory override is active, otherwise uses the bundled copy.
    pub fn from_resources() -> Result<Self> {
        if std::env::var_os(crate::RESOURCES_ENV).is_some() {
            Self::load(CONFIG_RESOURCE)
        } else {
            Self::bundled()
        }
    }

    /// Base URL after applying the environment override.
    ///
    /// `BOOKER_BASE_URL` is read first, then `PLAYWRIGHT_BASE_URL`. The first
    /// non-blank one takes precedence over the configured value.
    pub fn resolved_base_url(&self) -> String {
        let override_url = [BASE_URL_ENV, FALLBACK_BASE_URL_ENV]
            .into_iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|url| !url.trim().is_empty());
        resolve_base_url(&self.base_url, override_url.as_deref())
    }

    fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::Config("baseUrl cannot be empty".to_string()));
        }
        if self.valid_user.username.trim().is_empty() {
            return Err(Error::Config(
                "valid_user.username cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Pick the base URL: a non-blank override wins over the configured value.
pub fn resolve_base_url(configured: &str, override_url: Option<&str>) -> String {
    match override_url {
        Some(url) if !url.trim().is_empty() => url.trim().to_string(),
        _ => configured.to_string(),
    }
}
