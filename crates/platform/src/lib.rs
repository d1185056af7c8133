//! # Platform
//!
//! Core modules shared by the SmartRide crates: errors, injected provider
//! capabilities, handler plumbing, cancellable tasks and the key-value store.

pub mod api;
mod error;
mod provider;
pub mod store;
pub mod task;

pub use crate::error::*;
pub use crate::provider::*;
