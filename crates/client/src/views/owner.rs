use mock_api::FleetRequest;
use platform::api::{Client, Handler};
use platform::{Clock, Config, Random, Result};
use tracing::info;
use transit::{DataSource, FleetEntry, FleetSummary};

use crate::loader::Loader;
use crate::OWNER;

/// Owner fleet dashboard.
pub struct OwnerView {
    source: DataSource,
    fleet: Vec<FleetEntry>,
    loader: Loader<Vec<FleetEntry>>,
}

impl OwnerView {
    /// Open the dashboard and start loading the fleet.
    ///
    /// # Errors
    ///
    /// Propagates request construction errors.
    pub fn mount<P>(client: &Client<P>, source: DataSource) -> Result<Self>
    where
        P: Config + Clock + Random + Clone + 'static,
    {
        let request =
            <FleetRequest as Handler<P>>::from_input(Some(source.as_str().to_string()))?;
        let client = client.clone();
        let fetch = async move {
            client.request(request).owner(OWNER).await.map(|reply| reply.body.fleet)
        };
        let loader = Loader::mount("fleet", fetch);

        Ok(Self { source, fleet: Vec::new(), loader })
    }

    /// # Errors
    ///
    /// Returns the fetch error.
    pub async fn settle(&mut self) -> Result<()> {
        if let Some(fleet) = self.loader.settle().await? {
            self.fleet = fleet;
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
    pub fn fleet(&self) -> &[FleetEntry] {
        &self.fleet
    }

    #[must_use]
    pub const fn source(&self) -> DataSource {
        self.source
    }

    /// Switch data source, shifting loaded on-time figures in place.
    pub fn set_source(&mut self, source: DataSource) {
        if source == self.source {
            return;
        }
        self.source = source;
        for entry in &mut self.fleet {
            entry.apply_source(source);
        }
        info!(source = %source, "fleet data source changed");
    }

    #[must_use]
    pub fn summary(&self) -> FleetSummary {
        FleetSummary::from_entries(&self.fleet)
    }
}
