use platform::api::{Context, Handler, Reply};
use platform::{Clock, Config, Random, Result};
use tracing::info;
use transit::{BusSummary, SearchQuery};

use crate::generate;
use crate::latency::{self, SEARCH_LATENCY};

/// Buses serving a route, as listed on the results view.
#[derive(Debug, Clone)]
pub struct SearchBusesRequest(SearchQuery);

impl SearchBusesRequest {
    #[must_use]
    pub const fn query(&self) -> &SearchQuery {
        &self.0
    }
}

async fn handle<P>(
    owner: &str, request: SearchBusesRequest, provider: &P,
) -> Result<Reply<Vec<BusSummary>>>
where
    P: Config + Clock + Random,
{
    latency::simulate(provider, SEARCH_LATENCY).await;

    let buses = generate::search_buses(provider, request.query());
    info!(owner = %owner, route = %request.query().route_label(), results = buses.len(), "bus search");

    Ok(buses.into())
}

impl<P> Handler<P> for SearchBusesRequest
where
    P: Config + Clock + Random,
{
    type Input = SearchQuery;
    type Output = Vec<BusSummary>;

    fn from_input(input: SearchQuery) -> Result<Self> {
        Ok(Self(input))
    }

    async fn handle(self, ctx: Context<'_, P>) -> Result<Reply<Vec<BusSummary>>> {
        handle(ctx.owner, self, ctx.provider).await
    }
}
