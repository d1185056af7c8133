use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::provider::StateStore;

/// Process-local [`StateStore`]. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StateStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(map.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<Option<Vec<u8>>> {
        let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(map.insert(key.to_string(), value.to_vec()))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        map.remove(key);
        Ok(())
    }
}

/// Read a UTF-8 value. Invalid bytes are evicted and read as absent.
///
/// # Errors
///
/// Returns an error when the underlying store fails.
pub async fn get_string(store: &impl StateStore, key: &str) -> Result<Option<String>> {
    let Some(bytes) = store.get(key).await.with_context(|| format!("reading {key}"))? else {
        return Ok(None);
    };
    match String::from_utf8(bytes) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            warn!(key = key, error = %err, "failed to decode stored UTF-8 value");
            store.delete(key).await?;
            Ok(None)
        }
    }
}

/// Write a UTF-8 value.
///
/// # Errors
///
/// Returns an error when the underlying store fails.
pub async fn set_string(store: &impl StateStore, key: &str, value: &str) -> Result<()> {
    store.set(key, value.as_bytes()).await.with_context(|| format!("writing {key}"))?;
    Ok(())
}

/// Read a JSON value. Undecodable values are evicted and read as absent.
///
/// # Errors
///
/// Returns an error when the underlying store fails.
pub async fn get_json<T>(store: &impl StateStore, key: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    let Some(bytes) = store.get(key).await.with_context(|| format!("reading {key}"))? else {
        return Ok(None);
    };
    match serde_json::from_slice::<T>(&bytes) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            warn!(key = key, error = %err, "failed to deserialize stored JSON value");
            store.delete(key).await?;
            Ok(None)
        }
    }
}

/// Write a JSON value.
///
/// # Errors
///
/// Returns an error when serialization or the underlying store fails.
pub async fn set_json<T>(store: &impl StateStore, key: &str, value: &T) -> Result<()>
where
    T: Serialize + Sync,
{
    let payload = serde_json::to_vec(value).with_context(|| format!("serializing {key}"))?;
    store.set(key, &payload).await.with_context(|| format!("writing {key}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use serde::{Deserialize, Serialize};

    use super::{MemoryStore, get_json, get_string, set_json, set_string};
    use crate::provider::StateStore;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Fix {
        lat: f64,
        lng: f64,
    }

    #[tokio::test]
    async fn set_json_round_trips() -> Result<()> {
        let store = MemoryStore::new();
        let fix = Fix { lat: 40.7128, lng: -74.006 };

        set_json(&store, "smartride_location", &fix).await?;
        let stored = get_json::<Fix>(&store, "smartride_location").await?;

        assert_eq!(stored, Some(fix));
        Ok(())
    }

    #[tokio::test]
    async fn set_returns_previous() -> Result<()> {
        let store = MemoryStore::new();

        assert_eq!(store.set("bus-notes-1", b"first").await?, None);
        assert_eq!(store.set("bus-notes-1", b"second").await?, Some(b"first".to_vec()));
        assert_eq!(get_string(&store, "bus-notes-1").await?.as_deref(), Some("second"));
        Ok(())
    }

    #[tokio::test]
    async fn invalid_json_is_evicted() -> Result<()> {
        let store = MemoryStore::new();
        store.set("smartride_user", b"not-json").await?;

        assert!(get_json::<Fix>(&store, "smartride_user").await?.is_none());
        assert!(store.get("smartride_user").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn invalid_utf8_is_evicted() -> Result<()> {
        let store = MemoryStore::new();
        store.set("bus-notes-2", &[0, 159, 146, 150]).await?;

        assert!(get_string(&store, "bus-notes-2").await?.is_none());
        assert!(store.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn clones_share_state() -> Result<()> {
        let store = MemoryStore::new();
        let other = store.clone();

        set_string(&store, "smartride_user", "{}").await?;
        assert_eq!(other.len(), 1);

        other.delete("smartride_user").await?;
        assert!(store.is_empty());
        Ok(())
    }
}
