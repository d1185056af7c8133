//! # Transit
//!
//! SmartRide domain model: bus, fleet and journey records, the results
//! filter/sort pipeline and the indicator mappings the views render.

pub mod indicators;
pub mod map;
mod model;
pub mod pipeline;

pub use crate::model::*;
