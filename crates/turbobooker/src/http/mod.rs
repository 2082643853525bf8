//! HTTP request and response types
//!
//! Every call made by the harness goes through [`RequestBuilder::send`], which
//! issues exactly one request (no retries) and logs it via
//! [`observability`](crate::observability).

pub use request::RequestBuilder;
pub use response::ApiResponse;

mod request;
mod response;

// Re-export HTTP types from the http crate for convenience
pub use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
