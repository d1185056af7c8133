use booking::{BookingConfirmation, TripBookingDraft};
use platform::api::{Context, Handler, Reply};
use platform::{Clock, Config, Result, bad_request};
use tracing::info;

use crate::latency::{self, TRIP_LATENCY};

/// A posted trip booking.
#[derive(Debug, Clone)]
pub struct TripRequest(TripBookingDraft);

async fn handle<P>(
    owner: &str, request: TripRequest, provider: &P,
) -> Result<Reply<BookingConfirmation>>
where
    P: Config + Clock,
{
    latency::simulate(provider, TRIP_LATENCY).await;

    let confirmation = BookingConfirmation::new(request.0, provider.now().timestamp_millis());
    info!(
        owner = %owner,
        booking_id = %confirmation.booking_id,
        bus_type = %confirmation.booking.bus_type,
        "trip booking received"
    );

    Ok(confirmation.into())
}

impl<P> Handler<P> for TripRequest
where
    P: Config + Clock,
{
    /// JSON request body.
    type Input = String;
    type Output = BookingConfirmation;

    fn from_input(input: String) -> Result<Self> {
        let draft = serde_json::from_str(&input)
            .map_err(|e| bad_request!("invalid trip booking: {}", e))?;
        Ok(Self(draft))
    }

    async fn handle(self, ctx: Context<'_, P>) -> Result<Reply<BookingConfirmation>> {
        handle(ctx.owner, self, ctx.provider).await
    }
}
