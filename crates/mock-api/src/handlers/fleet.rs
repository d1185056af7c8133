use platform::api::{Context, Handler, Reply};
use platform::{Clock, Config, Random, Result};
use tracing::info;
use transit::{DataSource, FleetReport};

use crate::generate;
use crate::latency::{self, FLEET_LATENCY};

/// Fleet snapshot for the owner dashboard.
#[derive(Debug, Clone, Copy, Default)]
pub struct FleetRequest {
    pub source: DataSource,
}

async fn handle<P>(owner: &str, request: FleetRequest, provider: &P) -> Result<Reply<FleetReport>>
where
    P: Config + Clock + Random,
{
    latency::simulate(provider, FLEET_LATENCY).await;

    let source = request.source;
    let fleet = generate::fleet(provider, source);
    info!(owner = %owner, source = %source, size = fleet.len(), "fleet snapshot");

    Ok(FleetReport { fleet, source }.into())
}

impl<P> Handler<P> for FleetRequest
where
    P: Config + Clock + Random,
{
    /// Raw `source` query value.
    type Input = Option<String>;
    type Output = FleetReport;

    fn from_input(input: Option<String>) -> Result<Self> {
        let source = input.as_deref().map(str::parse::<DataSource>).transpose()?.unwrap_or_default();
        Ok(Self { source })
    }

    async fn handle(self, ctx: Context<'_, P>) -> Result<Reply<FleetReport>> {
        handle(ctx.owner, self, ctx.provider).await
    }
}
