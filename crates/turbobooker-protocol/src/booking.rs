//! Booking types
//!
//! The booking API spells every field as one lowercase word (`firstname`,
//! `totalprice`, `bookingdates`). Rust-side names are snake_case; each struct
//! below carries the complete rename table for its fields.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier entry returned by `GET /booking`.
///
/// The API sends ids as JSON numbers; they are kept as strings so they can be
/// spliced into request paths unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId {
    /// Booking identifier
    #[serde(rename = "bookingid", deserialize_with = "id_from_number_or_string")]
    pub booking_id: String,
}

impl BookingId {
    /// Create a new booking id.
    pub fn new(booking_id: impl Into<String>) -> Self {
        Self {
            booking_id: booking_id.into(),
        }
    }
}

impl std::fmt::Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.booking_id)
    }
}

/// Stay dates of a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDates {
    /// Arrival date
    #[serde(rename = "checkin")]
    pub check_in: NaiveDate,

    /// Departure date
    #[serde(rename = "checkout")]
    pub check_out: NaiveDate,
}

/// Full booking record as sent to `POST /booking` / `PUT /booking/{id}` and
/// returned by `GET /booking/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    /// Guest first name
    #[serde(rename = "firstname")]
    pub first_name: String,

    /// Guest last name
    #[serde(rename = "lastname")]
    pub last_name: String,

    /// Total price in whole currency units
    #[serde(rename = "totalprice")]
    pub total_price: i64,

    /// Whether the deposit has been paid
    #[serde(rename = "depositpaid")]
    pub deposit_paid: bool,

    /// Stay dates
    #[serde(rename = "bookingdates")]
    pub booking_dates: BookingDates,

    /// Free-form notes; the API omits the key when nothing was requested
    #[serde(
        rename = "additionalneeds",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_needs: Option<String>,
}

/// Response body of `POST /booking`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedBooking {
    /// Identifier assigned by the API
    #[serde(rename = "bookingid", deserialize_with = "id_from_number_or_string")]
    pub booking_id: String,

    /// Echo of the stored booking
    pub booking: BookingRecord,
}

/// Partial update body for `PATCH /booking/{id}`.
///
/// Only fields that are set are serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPatch {
    /// Guest first name
    #[serde(rename = "firstname", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    /// Guest last name
    #[serde(rename = "lastname", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Total price
    #[serde(rename = "totalprice", skip_serializing_if = "Option::is_none")]
    pub total_price: Option<i64>,

    /// Deposit flag
    #[serde(rename = "depositpaid", skip_serializing_if = "Option::is_none")]
    pub deposit_paid: Option<bool>,

    /// Stay dates
    #[serde(rename = "bookingdates", skip_serializing_if = "Option::is_none")]
    pub booking_dates: Option<BookingDates>,

    /// Free-form notes
    #[serde(rename = "additionalneeds", skip_serializing_if = "Option::is_none")]
    pub additional_needs: Option<String>,
}

impl BookingPatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the first name.
    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    /// Set the last name.
    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    /// Set the total price.
    pub fn total_price(mut self, total_price: i64) -> Self {
        self.total_price = Some(total_price);
        self
    }

    /// Set the deposit flag.
    pub fn deposit_paid(mut self, deposit_paid: bool) -> Self {
        self.deposit_paid = Some(deposit_paid);
        self
    }

    /// Set the stay dates.
    pub fn booking_dates(mut self, booking_dates: BookingDates) -> Self {
        self.booking_dates = Some(booking_dates);
        self
    }

    /// Set the additional needs.
    pub fn additional_needs(mut self, additional_needs: impl Into<String>) -> Self {
        self.additional_needs = Some(additional_needs.into());
        self
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn id_from_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}
