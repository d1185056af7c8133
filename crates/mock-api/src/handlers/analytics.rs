use platform::api::{Context, Handler, Reply};
use platform::{Clock, Config, Random, Result, bad_request};
use tracing::info;
use transit::BusAnalytics;

use crate::generate;
use crate::latency::{self, ANALYTICS_LATENCY};

/// Owner analytics for one bus.
#[derive(Debug, Clone)]
pub struct BusAnalyticsRequest(String);

async fn handle<P>(
    owner: &str, request: BusAnalyticsRequest, provider: &P,
) -> Result<Reply<BusAnalytics>>
where
    P: Config + Clock + Random,
{
    latency::simulate(provider, ANALYTICS_LATENCY).await;

    let analytics = generate::bus_analytics(provider, &request.0);
    info!(owner = %owner, bus_id = %analytics.id, confidence = analytics.confidence, "bus analytics");

    Ok(analytics.into())
}

impl<P> Handler<P> for BusAnalyticsRequest
where
    P: Config + Clock + Random,
{
    type Input = String;
    type Output = BusAnalytics;

    fn from_input(input: String) -> Result<Self> {
        if input.trim().is_empty() {
            return Err(bad_request!("bus id is required"));
        }
        Ok(Self(input))
    }

    async fn handle(self, ctx: Context<'_, P>) -> Result<Reply<BusAnalytics>> {
        handle(ctx.owner, self, ctx.provider).await
    }
}
