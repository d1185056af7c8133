mod analytics;
mod bus;
mod buses;
mod favorites;
mod fleet;
mod search;
mod trips;

pub use self::analytics::*;
pub use self::bus::*;
pub use self::buses::*;
pub use self::favorites::*;
pub use self::fleet::*;
pub use self::search::*;
pub use self::trips::*;
