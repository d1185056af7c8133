use platform::api::{Context, Handler, Reply};
use platform::{Clock, Config, Random, Result};
use serde::{Deserialize, Serialize};
use tracing::info;
use transit::{Journey, SearchQuery};

use crate::generate;
use crate::latency::{self, JOURNEY_LATENCY};

/// Direct and transfer journeys between two places.
#[derive(Debug, Clone)]
pub struct SearchRequest(SearchQuery);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchReply {
    pub success: bool,
    pub results: Vec<Journey>,
    pub search_params: SearchQuery,
}

async fn handle<P>(
    owner: &str, request: SearchRequest, provider: &P,
) -> Result<Reply<SearchReply>>
where
    P: Config + Clock + Random,
{
    latency::simulate(provider, JOURNEY_LATENCY).await;

    let query = request.0;
    let results = generate::journeys(&query);
    info!(
        owner = %owner,
        route = %query.route_label(),
        results = results.len(),
        "journey search"
    );

    Ok(SearchReply { success: true, results, search_params: query }.into())
}

impl<P> Handler<P> for SearchRequest
where
    P: Config + Clock + Random,
{
    type Input = SearchQuery;
    type Output = SearchReply;

    fn from_input(input: SearchQuery) -> Result<Self> {
        Ok(Self(input))
    }

    async fn handle(self, ctx: Context<'_, P>) -> Result<Reply<SearchReply>> {
        handle(ctx.owner, self, ctx.provider).await
    }
}
