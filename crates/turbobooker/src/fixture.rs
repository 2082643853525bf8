//! Per-suite setup and teardown
//!
//! [`BookingFixture::setup`] loads the configuration, opens a session and
//! authenticates it. If authentication fails the session is closed and the
//! error returned, so no test runs against a half-initialized fixture.
//! Teardown happens on [`teardown`](BookingFixture::teardown) or on drop,
//! whichever comes first.

use tracing::info;
use turbobooker_protocol::{BookingId, BookingRecord, decode_booking_record};

use crate::{
    bundle,
    config::Config,
    error::Result,
    resources::Bookings,
    sampler,
    session::Session,
};

/// Name of the booking payload used by creation tests.
pub const PROPER_BOOKING_RESOURCE: &str = "test-data/proper-booking.json";

const BUNDLED_PROPER_BOOKING: &str = include_str!("../resources/test-data/proper-booking.json");

/// An authenticated session plus the configuration it was built from.
#[derive(Debug)]
pub struct BookingFixture {
    config: Config,
    session: Session,
}

impl BookingFixture {
    /// Set up against the suite configuration (see [`Config::from_resources`]).
    pub async fn setup() -> Result<Self> {
        Self::setup_with(Config::from_resources()?).await
    }

    /// Set up against an explicit configuration.
    ///
    /// # Errors
    ///
    /// Invalid base URL, or any authentication failure. Both are fatal for
    /// the suite ([`Error::is_fatal`](crate::Error::is_fatal)).
    pub async fn setup_with(config: Config) -> Result<Self> {
        let session = Session::open(&config)?;
        Self::with_session(config, session).await
    }

    /// Authenticate an already opened session with the configured
    /// credentials. The session's base URL is used as is.
    pub async fn with_session(config: Config, mut session: Session) -> Result<Self> {
        session.authenticate(&config.valid_user).await?;
        info!(base_url = %session.base_url(), "Fixture ready");
        Ok(Self { config, session })
    }

    /// Close the session. Dropping the fixture has the same effect.
    pub fn teardown(mut self) {
        self.session.close();
    }

    /// The authenticated session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The configuration the fixture was built from.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The token obtained at setup.
    pub fn auth_token(&self) -> Option<&str> {
        self.session.auth_token()
    }

    /// `token=<token>`, ready for a `Cookie` header.
    pub fn auth_cookie(&self) -> Result<String> {
        self.session.auth_cookie()
    }

    /// Booking endpoints of the fixture's session.
    pub fn bookings(&self) -> Bookings<'_> {
        self.session.bookings()
    }

    /// Every booking id currently held by the API.
    pub async fn booking_ids(&self) -> Result<Vec<BookingId>> {
        sampler::list_booking_ids(&self.session).await
    }

    /// One existing booking id, chosen at random.
    pub async fn random_booking_id(&self) -> Result<String> {
        sampler::random_booking_id(&self.session).await
    }

    /// `count` distinct existing booking ids, chosen at random.
    pub async fn random_booking_ids(&self, count: usize) -> Result<Vec<String>> {
        sampler::sample_random(&self.session, count).await
    }

    /// The booking payload used by creation tests.
    pub fn proper_booking() -> Result<BookingRecord> {
        proper_booking()
    }
}

/// Load `test-data/proper-booking.json`, from the resource directory when it
/// is overridden, otherwise from the bundled copy.
pub fn proper_booking() -> Result<BookingRecord> {
    if std::env::var_os(crate::RESOURCES_ENV).is_some() {
        booking_from_resource(PROPER_BOOKING_RESOURCE)
    } else {
        Ok(decode_booking_record(BUNDLED_PROPER_BOOKING)?)
    }
}

/// Load any booking payload from the resource set.
pub fn booking_from_resource(name: &str) -> Result<BookingRecord> {
    Ok(decode_booking_record(&bundle::read_resource(name)?)?)
}
