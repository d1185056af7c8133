use platform::api::{Context, Handler, Reply};
use platform::{Clock, Config, Random, Result};
use tracing::info;
use transit::BusSummary;

use crate::generate;
use crate::latency::{self, FAVORITES_LATENCY};

/// The rider's favorite routes with fresh ETAs.
#[derive(Debug, Clone, Copy, Default)]
pub struct FavoritesRequest;

impl<P> Handler<P> for FavoritesRequest
where
    P: Config + Clock + Random,
{
    type Input = ();
    type Output = Vec<BusSummary>;

    fn from_input((): ()) -> Result<Self> {
        Ok(Self)
    }

    async fn handle(self, ctx: Context<'_, P>) -> Result<Reply<Vec<BusSummary>>> {
        latency::simulate(ctx.provider, FAVORITES_LATENCY).await;

        let favorites = generate::favorites(ctx.provider);
        info!(owner = %ctx.owner, count = favorites.len(), "favorites");

        Ok(favorites.into())
    }
}
