use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use platform::store::MemoryStore;
use platform::{Clock, Config, Random, SeededRandom, StateStore, SystemClock};

use crate::config;

/// Capabilities backing the HTTP service. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct AppContext {
    store: MemoryStore,
    clock: SystemClock,
    random: Arc<SeededRandom>,
    settings: HashMap<String, String>,
}

impl AppContext {
    /// Context seeded from `RANDOM_SEED` when set, otherwise from entropy.
    #[must_use]
    pub fn from_env() -> Self {
        config::get_random_seed().map_or_else(Self::default, Self::seeded)
    }

    /// Context with deterministic mock data.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self { random: Arc::new(SeededRandom::seeded(seed)), ..Self::default() }
    }

    /// Override an environment setting.
    #[must_use]
    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }
}

impl Config for AppContext {
    async fn get(&self, key: &str) -> Result<String> {
        if let Some(value) = self.settings.get(key) {
            return Ok(value.clone());
        }
        std::env::var(key).with_context(|| format!("{key} is not set"))
    }
}

impl Clock for AppContext {
    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    async fn sleep(&self, duration: Duration) {
        self.clock.sleep(duration).await;
    }
}

impl Random for AppContext {
    fn between(&self, low: u32, high: u32) -> u32 {
        self.random.between(low, high)
    }

    fn unit(&self) -> f64 {
        self.random.unit()
    }
}

impl StateStore for AppContext {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        StateStore::get(&self.store, key).await
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<Option<Vec<u8>>> {
        self.store.set(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.store.delete(key).await
    }
}
