use anyhow::Result;
use transit::Coordinate;

/// Device position lookup. Errors stand for a denied or failed request.
pub trait Geolocation: Send + Sync {
    fn current_position(&self) -> impl Future<Output = Result<Coordinate>> + Send;
}
