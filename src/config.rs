//! Service settings read from the environment.

use std::env;

pub const ADDR: &str = "SMARTRIDE_ADDR";
pub const RANDOM_SEED: &str = "RANDOM_SEED";

/// Socket address the service listens on.
#[must_use]
pub fn get_addr() -> String {
    env::var(ADDR).unwrap_or_else(|_| {
        let default = "0.0.0.0:8080".to_string();
        tracing::trace!("{ADDR} not set, using default: {default}");
        default
    })
}

/// Seed for deterministic mock data, if one is configured.
#[must_use]
pub fn get_random_seed() -> Option<u64> {
    let value = env::var(RANDOM_SEED).ok()?;
    match value.trim().parse() {
        Ok(seed) => {
            tracing::trace!("{RANDOM_SEED} loaded from environment");
            Some(seed)
        }
        Err(err) => {
            tracing::warn!(value = %value, error = %err, "ignoring invalid {RANDOM_SEED}");
            None
        }
    }
}
