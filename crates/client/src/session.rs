use platform::store::{get_json, get_string, set_json, set_string};
use platform::{Clock, Result, StateStore, unauthorized};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::geolocation::Geolocation;

pub const USER_KEY: &str = "smartride_user";
pub const LOCATION_KEY: &str = "smartride_location";

/// Store key for operator notes on bus `id`.
#[must_use]
pub fn notes_key(id: &str) -> String {
    format!("bus-notes-{id}")
}

/// Signed-in rider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub name: String,
}

/// Last detected position. `timestamp` is milliseconds since the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub lat: f64,
    pub lng: f64,
    pub timestamp: i64,
}

/// Persistent client state over an injected store.
#[derive(Debug, Clone)]
pub struct Session<S> {
    store: S,
}

impl<S: StateStore> Session<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Record `user` as signed in.
    ///
    /// # Errors
    ///
    /// Returns an error when the store fails.
    pub async fn login(&self, user: &User) -> Result<()> {
        set_json(&self.store, USER_KEY, user).await?;
        info!(email = %user.email, "signed in");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error when the store fails.
    pub async fn user(&self) -> Result<Option<User>> {
        Ok(get_json(&self.store, USER_KEY).await?)
    }

    /// The signed-in user.
    ///
    /// # Errors
    ///
    /// Returns an `Unauthorized` error when nobody is signed in.
    pub async fn require_user(&self) -> Result<User> {
        self.user().await?.ok_or_else(|| unauthorized!("sign in required"))
    }

    /// # Errors
    ///
    /// Returns an error when the store fails.
    pub async fn location(&self) -> Result<Option<LocationFix>> {
        Ok(get_json(&self.store, LOCATION_KEY).await?)
    }

    /// # Errors
    ///
    /// Returns an error when the store fails.
    pub async fn save_location(&self, fix: &LocationFix) -> Result<()> {
        Ok(set_json(&self.store, LOCATION_KEY, fix).await?)
    }

    /// Ask `geolocation` for a fix and store it. A denied or failed lookup
    /// is logged and yields `None`.
    ///
    /// # Errors
    ///
    /// Returns an error when the store fails.
    pub async fn detect_location(
        &self, geolocation: &impl Geolocation, clock: &impl Clock,
    ) -> Result<Option<LocationFix>> {
        let position = match geolocation.current_position().await {
            Ok(position) => position,
            Err(err) => {
                warn!(error = %err, "location detection failed, continuing without location");
                return Ok(None);
            }
        };

        let fix = LocationFix {
            lat: position.lat,
            lng: position.lng,
            timestamp: clock.now().timestamp_millis(),
        };
        self.save_location(&fix).await?;
        Ok(Some(fix))
    }

    /// Sign out, forgetting the user and the last location.
    ///
    /// # Errors
    ///
    /// Returns an error when the store fails.
    pub async fn logout(&self) -> Result<()> {
        self.store.delete(USER_KEY).await?;
        self.store.delete(LOCATION_KEY).await?;
        info!("signed out");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error when the store fails.
    pub async fn notes(&self, bus_id: &str) -> Result<Option<String>> {
        Ok(get_string(&self.store, &notes_key(bus_id)).await?)
    }

    /// # Errors
    ///
    /// Returns an error when the store fails.
    pub async fn save_notes(&self, bus_id: &str, notes: &str) -> Result<()> {
        Ok(set_string(&self.store, &notes_key(bus_id), notes).await?)
    }
}
