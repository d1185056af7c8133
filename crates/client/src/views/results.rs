use mock_api::SearchBusesRequest;
use platform::api::{Client, Handler};
use platform::task::CancellationToken;
use platform::{Clock, Config, Random, Result};
use transit::pipeline::{Controls, Pipeline, RushFilter, SortKey};
use transit::{BusSummary, SearchQuery};

use crate::loader::Loader;
use crate::OWNER;

/// Search results with filter and sort controls.
pub struct ResultsView {
    query: SearchQuery,
    pipeline: Pipeline<BusSummary>,
    loader: Loader<Vec<BusSummary>>,
}

impl ResultsView {
    /// Open the results view and start the search.
    ///
    /// # Errors
    ///
    /// Returns a `BadRequest` error when the query is invalid.
    pub fn mount<P>(client: &Client<P>, query: SearchQuery, controls: Controls) -> Result<Self>
    where
        P: Config + Clock + Random + Clone + 'static,
    {
        let request = <SearchBusesRequest as Handler<P>>::from_input(query.clone())?;
        let client = client.clone();
        let fetch = async move {
            client.request(request).owner(OWNER).await.map(|reply| reply.body)
        };
        let loader = Loader::mount("bus search", fetch);

        Ok(Self { query, pipeline: Pipeline::new(Vec::new(), controls), loader })
    }

    /// # Errors
    ///
    /// Returns the fetch error.
    pub async fn settle(&mut self) -> Result<()> {
        if let Some(buses) = self.loader.settle().await? {
            self.pipeline.set_source(buses);
        }
        Ok(())
    }

    pub fn dispose(&self) {
        self.loader.dispose();
    }

    /// Handle that disposes the view from another task.
    #[must_use]
    pub fn disposer(&self) -> CancellationToken {
        self.loader.token()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loader.is_pending()
    }

    /// Loaded, but nothing survives the controls.
    #[must_use]
    pub fn no_results(&self) -> bool {
        !self.is_loading() && self.pipeline.is_empty()
    }

    #[must_use]
    pub fn results(&self) -> &[BusSummary] {
        self.pipeline.derived()
    }

    #[must_use]
    pub const fn controls(&self) -> &Controls {
        self.pipeline.controls()
    }

    #[must_use]
    pub fn route_label(&self) -> String {
        self.query.route_label()
    }

    #[must_use]
    pub fn departure_label(&self) -> String {
        self.query.departure_label()
    }

    pub fn set_rush(&mut self, rush: RushFilter) {
        self.pipeline.set_rush(rush);
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.pipeline.set_sort(sort);
    }

    pub fn toggle_alternatives(&mut self) {
        self.pipeline.toggle_alternatives();
    }

    pub fn reset_filters(&mut self) {
        self.pipeline.reset_filters();
    }
}
