//! View state, one module per page.

mod bus;
mod home;
mod owner;
mod owner_bus;
mod results;

pub use self::bus::*;
pub use self::home::*;
pub use self::owner::*;
pub use self::owner_bus::*;
pub use self::results::*;
