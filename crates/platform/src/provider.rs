//! # Provider
//!
//! Provider defines the capabilities injected into handlers and views. The
//! host binary supplies real implementations; tests supply deterministic ones.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The `Config` trait is used by implementers to provide configuration
/// settings to dependent crates.
pub trait Config: Send + Sync {
    /// Request configuration setting.
    fn get(&self, key: &str) -> impl Future<Output = Result<String>> + Send;
}

/// The `StateStore` trait defines key-value persistence (session flag,
/// last location fix, operator notes).
pub trait StateStore: Send + Sync {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<Vec<u8>>>> + Send;

    /// Store `value`, returning the previous value, if any.
    fn set(&self, key: &str, value: &[u8])
    -> impl Future<Output = Result<Option<Vec<u8>>>> + Send;

    fn delete(&self, key: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Wall clock and simulated latency.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Suspend the caller for `duration`.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Source of randomness for mock data generation.
pub trait Random: Send + Sync {
    /// Uniform integer in `[low, high)`. Returns `low` for an empty range.
    fn between(&self, low: u32, high: u32) -> u32;

    /// Uniform float in `[0, 1)`.
    fn unit(&self) -> f64;

    /// Pick one element of `items` uniformly.
    fn pick<'a, T>(&self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        let len = u32::try_from(items.len()).ok()?;
        items.get(self.between(0, len) as usize)
    }
}

/// `Random` backed by a seedable [`StdRng`].
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    /// Deterministic sequence for the given seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self { rng: Mutex::new(StdRng::seed_from_u64(seed)) }
    }

    /// Sequence seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self { rng: Mutex::new(StdRng::from_entropy()) }
    }
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl Random for SeededRandom {
    fn between(&self, low: u32, high: u32) -> u32 {
        if low >= high {
            return low;
        }
        self.rng.lock().unwrap_or_else(PoisonError::into_inner).gen_range(low..high)
    }

    fn unit(&self) -> f64 {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner).r#gen::<f64>()
    }
}

/// `Clock` backed by the system time and the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
