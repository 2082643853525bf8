//! Buffered HTTP response

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// A fully buffered response from the booking API.
///
/// The status is not checked on construction: negative tests inspect 4xx
/// responses directly. Use [`error_for_status`](Self::error_for_status) where
/// success is required.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl ApiResponse {
    pub(crate) fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status. Compares directly with integers: `response.status() == 404`.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// True for any 2xx status.
    pub fn ok(&self) -> bool {
        self.status.is_success()
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Body as text. Invalid UTF-8 sequences are replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Deserialize the body into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Body as an untyped JSON tree, e.g. for schema validation.
    pub fn json_value(&self) -> Result<serde_json::Value> {
        self.json()
    }

    /// Return `self` for 2xx statuses, otherwise [`Error::Api`] with the body.
    pub fn error_for_status(self) -> Result<Self> {
        if self.ok() {
            Ok(self)
        } else {
            Err(Error::api(self.status.as_u16(), self.text()))
        }
    }
}
