//! Booking endpoints
//!
//! Typed wrappers over `/booking`. Each method requires success and decodes
//! the body; use [`Session`] directly to inspect error responses.

use http::Method;
use tracing::info;
use turbobooker_protocol::{
    BookingId, BookingPatch, BookingRecord, CreatedBooking, decode_booking_record,
    decode_created_booking,
};

use crate::{
    BOOKING_PATH,
    error::{Error, Result},
    sampler,
    session::Session,
};

/// Booking endpoints of a session.
#[derive(Debug, Clone, Copy)]
pub struct Bookings<'a> {
    session: &'a Session,
}

impl<'a> Bookings<'a> {
    pub(crate) fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// `GET /booking`: every booking id.
    pub async fn list(&self) -> Result<Vec<BookingId>> {
        sampler::list_booking_ids(self.session).await
    }

    /// `GET /booking/{id}`.
    pub async fn get(&self, id: &str) -> Result<BookingRecord> {
        let response = self
            .session
            .get(&booking_path(id))?
            .send()
            .await?
            .error_for_status()?;
        Ok(decode_booking_record(&response.text())?)
    }

    /// `POST /booking`. The response echoes the record with its new id.
    pub async fn create(&self, record: &BookingRecord) -> Result<CreatedBooking> {
        let response = self
            .session
            .post(BOOKING_PATH)?
            .json(record)?
            .send()
            .await?
            .error_for_status()?;
        let created = decode_created_booking(&response.text())?;
        info!(booking_id = %created.booking_id, "Booking created");
        Ok(created)
    }

    /// `PUT /booking/{id}`: replace the whole record. Requires a token.
    pub async fn update(&self, id: &str, record: &BookingRecord) -> Result<BookingRecord> {
        let response = self
            .session
            .authorized(Method::PUT, &booking_path(id))?
            .json(record)?
            .send()
            .await?
            .error_for_status()?;
        Ok(decode_booking_record(&response.text())?)
    }

    /// `PATCH /booking/{id}`: change only the fields set in `patch`. Requires
    /// a token.
    pub async fn partial_update(&self, id: &str, patch: &BookingPatch) -> Result<BookingRecord> {
        let response = self
            .session
            .authorized(Method::PATCH, &booking_path(id))?
            .json(patch)?
            .send()
            .await?
            .error_for_status()?;
        Ok(decode_booking_record(&response.text())?)
    }

    /// `DELETE /booking/{id}`. Requires a token.
    ///
    /// The API signals a successful delete with `201 Created`; any other
    /// status is an error.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let response = self
            .session
            .authorized(Method::DELETE, &booking_path(id))?
            .send()
            .await?;
        if response.status() != 201 {
            return Err(Error::api(response.status().as_u16(), response.text()));
        }
        info!(booking_id = %id, "Booking deleted");
        Ok(())
    }
}

fn booking_path(id: &str) -> String {
    format!("{}/{}", BOOKING_PATH, id)
}
