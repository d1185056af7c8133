//! # Mock API
//!
//! Synthetic SmartRide endpoints. Each request type implements
//! [`platform::api::Handler`] for any provider supplying configuration, a
//! clock and a random source; replies are generated fresh on every call
//! after a simulated delay.

pub mod generate;
mod handlers;
pub mod latency;

pub use self::handlers::*;
