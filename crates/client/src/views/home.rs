use std::time::Duration;

use mock_api::FavoritesRequest;
use platform::api::{Client, Handler};
use platform::{Clock, Config, Random, Result, StateStore, bad_request};
use tracing::debug;
use transit::{BusSummary, SearchQuery};

use crate::geolocation::Geolocation;
use crate::loader::Loader;
use crate::session::{Session, User};
use crate::OWNER;

/// How often favorite ETAs count down.
pub const TICK_INTERVAL: Duration = Duration::from_secs(30);

/// Label used for the origin once a location is known.
pub const CURRENT_LOCATION: &str = "Current Location";

const TICK_THRESHOLD: f64 = 0.7;

/// Landing page: trip planner and favorite routes.
pub struct HomeView<'a, S> {
    session: &'a Session<S>,
    user: User,
    from: String,
    to: String,
    time: String,
    location_detected: bool,
    favorites: Vec<BusSummary>,
    loader: Loader<Vec<BusSummary>>,
}

impl<'a, S: StateStore> HomeView<'a, S> {
    /// Open the home view and start loading favorites.
    ///
    /// # Errors
    ///
    /// Returns an `Unauthorized` error when nobody is signed in.
    pub async fn mount<P>(client: &Client<P>, session: &'a Session<S>) -> Result<Self>
    where
        P: Config + Clock + Random + Clone + 'static,
    {
        let user = session.require_user().await?;

        let location_detected = session.location().await?.is_some();
        let from = if location_detected { CURRENT_LOCATION.to_string() } else { String::new() };

        let request = <FavoritesRequest as Handler<P>>::from_input(())?;
        let client = client.clone();
        let fetch = async move {
            client.request(request).owner(OWNER).await.map(|reply| reply.body)
        };
        let loader = Loader::mount("favorites", fetch);

        Ok(Self {
            session,
            user,
            from,
            to: String::new(),
            time: "now".to_string(),
            location_detected,
            favorites: Vec::new(),
            loader,
        })
    }

    /// Apply the loaded favorites unless the view was disposed.
    ///
    /// # Errors
    ///
    /// Returns the fetch error.
    pub async fn settle(&mut self) -> Result<()> {
        if let Some(favorites) = self.loader.settle().await? {
            self.favorites = favorites;
        }
        Ok(())
    }

    pub fn dispose(&self) {
        self.loader.dispose();
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loader.is_pending()
    }

    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }

    #[must_use]
    pub fn favorites(&self) -> &[BusSummary] {
        &self.favorites
    }

    #[must_use]
    pub fn from(&self) -> &str {
        &self.from
    }

    #[must_use]
    pub fn to(&self) -> &str {
        &self.to
    }

    #[must_use]
    pub const fn location_detected(&self) -> bool {
        self.location_detected
    }

    pub fn set_from(&mut self, from: impl Into<String>) {
        self.from = from.into();
    }

    pub fn set_to(&mut self, to: impl Into<String>) {
        self.to = to.into();
    }

    pub fn set_time(&mut self, time: impl Into<String>) {
        self.time = time.into();
    }

    pub const fn swap(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }

    /// Count favorite ETAs down. Each one drops a minute with probability
    /// 0.3 and never goes below one.
    pub fn tick(&mut self, random: &impl Random) {
        for favorite in &mut self.favorites {
            let step = u32::from(random.unit() > TICK_THRESHOLD);
            favorite.eta_min = favorite.eta_min.saturating_sub(step).max(1);
        }
    }

    /// Detect and store the rider's location, prefilling the origin.
    /// Returns whether a location was found.
    ///
    /// # Errors
    ///
    /// Returns an error when the store fails.
    pub async fn detect_location(
        &mut self, geolocation: &impl Geolocation, clock: &impl Clock,
    ) -> Result<bool> {
        if self.session.detect_location(geolocation, clock).await?.is_none() {
            return Ok(false);
        }
        self.from = CURRENT_LOCATION.to_string();
        self.location_detected = true;
        Ok(true)
    }

    /// Query for the results view.
    ///
    /// # Errors
    ///
    /// Returns a `BadRequest` error until both ends of the trip are set.
    pub fn search_query(&self) -> Result<SearchQuery> {
        if self.from.trim().is_empty() || self.to.trim().is_empty() {
            return Err(bad_request!("both from and to are required"));
        }
        Ok(SearchQuery {
            from: Some(self.from.clone()),
            to: Some(self.to.clone()),
            time: Some(self.time.clone()),
        })
    }

    /// Sign out, closing the view.
    ///
    /// # Errors
    ///
    /// Returns an error when the store fails.
    pub async fn logout(self) -> Result<()> {
        self.dispose();
        debug!(email = %self.user.email, "logging out");
        self.session.logout().await
    }
}
