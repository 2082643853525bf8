//! Wire types for the restful-booker booking API
//!
//! This crate holds the data structures exchanged with the booking API and the
//! codec that maps between the wire spelling (`firstname`, `totalprice`, ...)
//! and idiomatic Rust field names. The mapping lives in exactly one place per
//! record type: the serde `rename` attributes on the type itself.
//!
//! # Type Organization
//!
//! - **Booking types**: [`booking`] - ids, records, dates, create responses, patches
//! - **Auth types**: [`auth`] - credential payload and token response
//! - **Codec**: [`codec`] - decode/encode helpers with typed errors
//! - **Error types**: [`error`] - decode/encode failures
//!
//! # Design Principles
//!
//! - **Zero I/O**: All types are pure data structures
//! - **Serialization**: serde-based, JSON on the wire
//! - **No circular dependencies**: depends only on serde/chrono
//!
//! # Usage
//!
//! ```
//! use turbobooker_protocol::codec::decode_booking_ids;
//!
//! let ids = decode_booking_ids(r#"[{"bookingid": 7}, {"bookingid": 12}]"#).unwrap();
//! assert_eq!(ids[0].booking_id, "7");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod auth;
pub mod booking;
pub mod codec;
pub mod error;

// Re-export commonly used types at crate level
pub use auth::{AuthRequest, AuthResponse};
pub use booking::{BookingDates, BookingId, BookingPatch, BookingRecord, CreatedBooking};
pub use codec::{
    decode_booking_ids, decode_booking_record, decode_created_booking, encode_booking_record,
};
pub use error::{ProtocolError, Result};
