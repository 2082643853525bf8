//! HTTP request builder

use super::ApiResponse;
use crate::{
    error::{Error, Result},
    observability::{RequestMetadata, RequestTimer, ResponseMetadata},
};
use http::{HeaderMap, HeaderName, HeaderValue, Method, header::CONTENT_TYPE};
use serde::Serialize;
use url::Url;

/// Builder for a single HTTP request.
///
/// Obtained from [`Session::request`](crate::Session::request) and friends;
/// the session's default headers are already applied by the underlying client.
///
/// The builder borrows the session's client, so the session cannot be closed
/// while a request is still pending:
///
/// ```compile_fail
/// # async fn demo() -> turbobooker::Result<()> {
/// let mut session = turbobooker::Session::builder().open()?;
/// let pending = session.get("/booking")?;
/// session.close();
/// pending.send().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RequestBuilder<'a> {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
    http_client: &'a reqwest::Client,
}

impl<'a> RequestBuilder<'a> {
    pub(crate) fn new(http_client: &'a reqwest::Client, method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
            http_client,
        }
    }

    /// Set a header, replacing any previous value for the same name.
    ///
    /// # Errors
    /// Returns an error if the header name or value contains invalid characters.
    pub fn header(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let key_str = key.as_ref();
        let value_str = value.as_ref();

        let key = key_str
            .parse::<HeaderName>()
            .map_err(|e| Error::InvalidHeaderName(format!("'{}': {}", key_str, e)))?;
        let value = value_str
            .parse::<HeaderValue>()
            .map_err(|e| Error::InvalidHeaderValue(format!("header '{}': {}", key_str, e)))?;

        self.headers.insert(key, value);
        Ok(self)
    }

    /// Serialize `body` as the JSON request body and set
    /// `Content-Type: application/json`.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_vec(body)?);
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(self)
    }

    /// Set a raw request body. No content type is added.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Get the HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Get the fully resolved URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Get the per-request headers (session defaults are not included).
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Send the request and buffer the whole response.
    ///
    /// Any status code is returned as a response; only transport failures are
    /// errors.
    pub async fn send(self) -> Result<ApiResponse> {
        let mut metadata = RequestMetadata::new(self.method.as_str(), self.url.path());
        if let Some(body) = &self.body {
            metadata = metadata.with_body_size(body.len());
        }
        metadata.log_request();

        let mut req = self
            .http_client
            .request(self.method, self.url)
            .headers(self.headers);
        if let Some(body) = self.body {
            req = req.body(body);
        }

        let timer = RequestTimer::start();
        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(e) => {
                metadata.log_transport_error(timer.elapsed(), &e.to_string());
                return Err(e.into());
            }
        };

        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp
            .bytes()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        ResponseMetadata::new(status.as_u16(), timer.elapsed())
            .with_body_size(body.len())
            .log(&metadata);

        Ok(ApiResponse::new(status, headers, body))
    }
}
