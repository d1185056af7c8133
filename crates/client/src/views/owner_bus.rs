use mock_api::BusAnalyticsRequest;
use platform::api::{Client, Handler};
use platform::{Clock, Config, Random, Result, StateStore};
use tracing::debug;
use transit::BusAnalytics;
use transit::indicators::{self, ConfidenceChip, SparkBar};

use crate::loader::Loader;
use crate::session::Session;
use crate::OWNER;

/// Owner analytics and operator notes for one bus.
pub struct OwnerBusView<'a, S> {
    id: String,
    session: &'a Session<S>,
    analytics: Option<BusAnalytics>,
    notes: String,
    loader: Loader<BusAnalytics>,
}

impl<'a, S: StateStore> OwnerBusView<'a, S> {
    /// # Errors
    ///
    /// Returns a `BadRequest` error when `id` is empty.
    pub fn mount<P>(client: &Client<P>, session: &'a Session<S>, id: &str) -> Result<Self>
    where
        P: Config + Clock + Random + Clone + 'static,
    {
        let request = <BusAnalyticsRequest as Handler<P>>::from_input(id.to_string())?;
        let client = client.clone();
        let fetch = async move {
            client.request(request).owner(OWNER).await.map(|reply| reply.body)
        };
        let loader = Loader::mount(format!("analytics {id}"), fetch);

        Ok(Self { id: id.to_string(), session, analytics: None, notes: String::new(), loader })
    }

    /// Apply loaded analytics. Notes come from the store when present,
    /// otherwise from the analytics default.
    ///
    /// # Errors
    ///
    /// Returns the fetch or store error.
    pub async fn settle(&mut self) -> Result<()> {
        let Some(analytics) = self.loader.settle().await? else {
            return Ok(());
        };
        self.notes = match self.session.notes(&self.id).await? {
            Some(saved) => saved,
            None => analytics.notes.clone(),
        };
        self.analytics = Some(analytics);
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
    pub const fn analytics(&self) -> Option<&BusAnalytics> {
        self.analytics.as_ref()
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Replace the notes and persist them.
    ///
    /// # Errors
    ///
    /// Returns an error when the store fails.
    pub async fn edit_notes(&mut self, notes: impl Into<String>) -> Result<()> {
        self.notes = notes.into();
        self.session.save_notes(&self.id, &self.notes).await?;
        debug!(bus_id = %self.id, "notes saved");
        Ok(())
    }

    #[must_use]
    pub fn confidence(&self) -> Option<ConfidenceChip> {
        self.analytics.as_ref().map(|a| ConfidenceChip::new(a.confidence, None))
    }

    #[must_use]
    pub fn rush_trend(&self) -> Vec<SparkBar> {
        self.analytics
            .as_ref()
            .map(|a| indicators::sparkline(&a.rush_trend.iter().map(|p| p.rush).collect::<Vec<_>>()))
            .unwrap_or_default()
    }
}
