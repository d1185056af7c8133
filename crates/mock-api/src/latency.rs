//! Simulated network latency.

use std::time::Duration;

use platform::{Clock, Config};
use tracing::{debug, warn};

pub const SEARCH_LATENCY: Duration = Duration::from_millis(800);
pub const DETAIL_LATENCY: Duration = Duration::from_millis(600);
pub const JOURNEY_LATENCY: Duration = Duration::from_millis(800);
pub const TRIP_LATENCY: Duration = Duration::from_millis(1500);
pub const FLEET_LATENCY: Duration = Duration::from_millis(700);
pub const ANALYTICS_LATENCY: Duration = Duration::from_millis(500);
pub const FAVORITES_LATENCY: Duration = Duration::from_millis(500);

/// Percentage applied to every simulated latency. `0` disables delays.
pub const LATENCY_SCALE: &str = "LATENCY_SCALE";
const DEFAULT_SCALE: u32 = 100;

async fn scale(provider: &impl Config) -> u32 {
    let Ok(value) = Config::get(provider, LATENCY_SCALE).await else {
        return DEFAULT_SCALE;
    };
    value.trim().parse().unwrap_or_else(|_| {
        warn!(value = %value, "invalid {LATENCY_SCALE}, using {DEFAULT_SCALE}");
        DEFAULT_SCALE
    })
}

/// Suspend for `base` scaled by the configured percentage.
pub async fn simulate<P>(provider: &P, base: Duration)
where
    P: Config + Clock,
{
    let scale = scale(provider).await;
    if scale == 0 {
        return;
    }
    let delay = base * scale / DEFAULT_SCALE;
    debug!(delay_ms = delay.as_millis(), "simulating latency");
    provider.sleep(delay).await;
}
