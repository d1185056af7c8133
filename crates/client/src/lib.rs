//! # Client
//!
//! Client-side fetch layer. Each view requests its data once on mount
//! through a cancellable [`Loader`], keeps it in view-local state and drops
//! late results once disposed. Persistent state lives behind an explicit
//! [`Session`].

mod geolocation;
mod loader;
mod session;
pub mod views;

pub use self::geolocation::*;
pub use self::loader::*;
pub use self::session::*;

/// Owner name attached to requests issued by the views.
pub const OWNER: &str = "smartride";
