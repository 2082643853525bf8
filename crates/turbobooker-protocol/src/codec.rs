//! Decoding of raw response bodies into booking records
//!
//! Every function surfaces malformed JSON and missing fields as
//! [`ProtocolError::Decode`]; nothing is defaulted silently.

use crate::booking::{BookingId, BookingRecord, CreatedBooking};
use crate::error::{ProtocolError, Result};

/// Decode the body of `GET /booking`.
pub fn decode_booking_ids(raw: &str) -> Result<Vec<BookingId>> {
    serde_json::from_str(raw).map_err(|e| ProtocolError::decode("booking id list", e))
}

/// Decode the body of `GET /booking/{id}`.
pub fn decode_booking_record(raw: &str) -> Result<BookingRecord> {
    serde_json::from_str(raw).map_err(|e| ProtocolError::decode("booking record", e))
}

/// Decode the body of `POST /booking`.
pub fn decode_created_booking(raw: &str) -> Result<CreatedBooking> {
    serde_json::from_str(raw).map_err(|e| ProtocolError::decode("created booking", e))
}

/// Encode a booking record using the wire field names.
pub fn encode_booking_record(record: &BookingRecord) -> Result<String> {
    serde_json::to_string(record).map_err(|e| ProtocolError::encode("booking record", e))
}
