//! # Booking
//!
//! Three-step trip booking wizard. A draft is collected across the steps and
//! materialised into an immutable [`TripBooking`] on submission.

mod model;
mod wizard;

pub use self::model::*;
pub use self::wizard::*;
