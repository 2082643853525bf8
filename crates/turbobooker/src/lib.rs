//! # TurboBooker
//!
//! Test harness for the restful-booker REST API:
//! - One HTTP session per fixture with a guaranteed close
//! - Token authentication via `POST /auth`, reused for every mutating call
//! - Random sampling of unique booking ids for data-driven tests
//! - Typed decoding of booking responses
//! - JSON-schema validation with a caller-located assertion helper
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use turbobooker::{BookingFixture, schema::assert_valid_schema};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fixture = BookingFixture::setup().await?;
//!
//!     let id = fixture.random_booking_id().await?;
//!     let response = fixture.session().get(&format!("/booking/{id}"))?.send().await?;
//!     assert!(response.ok());
//!
//!     assert_valid_schema(&response.json_value()?, "schemas/booking-data.json");
//!
//!     fixture.teardown();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// Re-export commonly used types
pub use config::{Config, Credentials};
pub use error::{Error, Result};
pub use fixture::BookingFixture;
pub use http::ApiResponse;
pub use schema::{SchemaValidator, ValidationReport, Violation};
pub use session::{Session, SessionBuilder, SessionState};

// Module declarations
pub mod auth;
pub mod bundle;
pub mod config;
pub mod error;
pub mod fixture;
pub mod http;
pub mod observability;
pub mod resources;
pub mod sampler;
pub mod schema;
pub mod session;

// Re-export the wire types so tests need a single dependency
pub use turbobooker_protocol as protocol;
pub use turbobooker_protocol::{
    BookingDates, BookingId, BookingPatch, BookingRecord, CreatedBooking,
};

/// Prelude module for common imports
///
/// # Examples
///
/// ```rust
/// use turbobooker::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        ApiResponse, BookingFixture, Config, Credentials, Error, Result, Session, SessionState,
        schema::{SchemaValidator, assert_valid_schema},
    };
    pub use turbobooker_protocol::{
        BookingDates, BookingId, BookingPatch, BookingRecord, CreatedBooking,
    };
}

/// Harness version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Public restful-booker instance
pub const DEFAULT_BASE_URL: &str = "https://restful-booker.herokuapp.com";

/// Environment variable that overrides the configured base URL at open time
pub const BASE_URL_ENV: &str = "BOOKER_BASE_URL";

/// Base URL override read when [`BASE_URL_ENV`] is unset or blank
pub const FALLBACK_BASE_URL_ENV: &str = "PLAYWRIGHT_BASE_URL";

/// Environment variable that relocates the resource directory
pub const RESOURCES_ENV: &str = "TURBOBOOKER_RESOURCES";

/// Token endpoint
pub const AUTH_PATH: &str = "/auth";

/// Booking collection endpoint
pub const BOOKING_PATH: &str = "/booking";
