//! API resource endpoints

pub mod bookings;

pub use bookings::Bookings;
