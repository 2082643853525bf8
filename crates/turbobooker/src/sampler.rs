//! Random selection of existing booking ids
//!
//! Data-driven tests pick ids from the live `GET /booking` list. Selection is
//! uniform without replacement over the *distinct* ids, done in a single
//! bounded pass: asking for more ids than exist fails immediately with
//! [`Error::SampleConstraint`] instead of looping.

use std::collections::HashSet;

use rand::{Rng, seq::SliceRandom};
use tracing::debug;
use turbobooker_protocol::{BookingId, decode_booking_ids};

use crate::{
    BOOKING_PATH,
    error::{Error, Result},
    session::Session,
};

/// Fetch every booking id the API currently holds.
///
/// # Errors
///
/// [`Error::Api`] for a non-2xx status, [`Error::Protocol`] if the body is not
/// an array of `{"bookingid": ...}` objects.
pub async fn list_booking_ids(session: &Session) -> Result<Vec<BookingId>> {
    let response = session
        .get(BOOKING_PATH)?
        .send()
        .await?
        .error_for_status()?;

    let ids = decode_booking_ids(&response.text())?;
    debug!(count = ids.len(), "Fetched booking ids");
    Ok(ids)
}

/// Pick `count` distinct ids from `ids`, uniformly at random.
///
/// Duplicate ids in the input count once. `count == 0` yields an empty list.
///
/// # Errors
///
/// [`Error::SampleConstraint`] if fewer than `count` distinct ids exist.
pub fn sample_unique<R>(ids: &[BookingId], count: usize, rng: &mut R) -> Result<Vec<String>>
where
    R: Rng + ?Sized,
{
    let pool = distinct(ids);
    if pool.len() < count {
        return Err(Error::SampleConstraint {
            available: pool.len(),
            requested: count,
        });
    }

    Ok(pool
        .choose_multiple(rng, count)
        .map(|id| (*id).to_string())
        .collect())
}

/// Pick one id from `ids`, uniformly at random over the distinct ids.
///
/// Same as [`sample_unique`] with `count == 1`.
pub fn sample_one<R>(ids: &[BookingId], rng: &mut R) -> Result<String>
where
    R: Rng + ?Sized,
{
    let mut picked = sample_unique(ids, 1, rng)?;
    picked.pop().ok_or(Error::SampleConstraint {
        available: 0,
        requested: 1,
    })
}

/// Fetch the id list and pick `count` distinct ids from it.
pub async fn sample_random(session: &Session, count: usize) -> Result<Vec<String>> {
    let ids = list_booking_ids(session).await?;
    sample_unique(&ids, count, &mut rand::thread_rng())
}

/// Fetch the id list and pick one id from it.
pub async fn random_booking_id(session: &Session) -> Result<String> {
    let ids = list_booking_ids(session).await?;
    sample_one(&ids, &mut rand::thread_rng())
}

fn distinct(ids: &[BookingId]) -> Vec<&str> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter()
        .map(|id| id.booking_id.as_str())
        .filter(|id| seen.insert(*id))
        .collect()
}
