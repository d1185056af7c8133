use platform::api::{Context, Handler, Reply};
use platform::{Clock, Config, Random, Result, bad_request};
use tracing::info;
use transit::BusDetail;

use crate::generate;
use crate::latency::{self, DETAIL_LATENCY};

/// Detail for one bus, including next stops and live updates.
#[derive(Debug, Clone)]
pub struct BusDetailRequest(String);

async fn handle<P>(owner: &str, request: BusDetailRequest, provider: &P) -> Result<Reply<BusDetail>>
where
    P: Config + Clock + Random,
{
    latency::simulate(provider, DETAIL_LATENCY).await;

    let detail = generate::bus_detail(provider, &request.0);
    info!(owner = %owner, bus_id = %detail.id, eta_min = detail.eta_min, "bus detail");

    Ok(detail.into())
}

impl<P> Handler<P> for BusDetailRequest
where
    P: Config + Clock + Random,
{
    type Input = String;
    type Output = BusDetail;

    fn from_input(input: String) -> Result<Self> {
        if input.trim().is_empty() {
            return Err(bad_request!("bus id is required"));
        }
        Ok(Self(input))
    }

    async fn handle(self, ctx: Context<'_, P>) -> Result<Reply<BusDetail>> {
        handle(ctx.owner, self, ctx.provider).await
    }
}
