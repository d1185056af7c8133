use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::Router;
use booking::BookingConfirmation;
use mock_api::{
    BusAnalyticsRequest, BusDetailRequest, FavoritesRequest, FleetRequest, SearchBusesRequest,
    SearchReply, SearchRequest, TripRequest,
};
use platform::api::{Handler, Reply};
use platform::HttpResult;
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use transit::{BusAnalytics, BusDetail, BusSummary, FleetReport, SearchQuery};

use crate::provider::AppContext;

const OWNER: &str = "smartride";

/// Mock endpoints over `ctx`.
pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/bus/{id}", get(bus_detail))
        .route("/search", get(search))
        .route("/search/buses", get(search_buses))
        .route("/trips", post(trips))
        .route("/owner/fleet", get(fleet))
        .route("/owner/bus/{id}", get(bus_analytics))
        .route("/favorites", get(favorites))
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .with_state(ctx)
}

async fn health() -> &'static str {
    "OK"
}

#[axum::debug_handler]
async fn bus_detail(
    State(ctx): State<AppContext>, Path(id): Path<String>,
) -> HttpResult<Reply<BusDetail>> {
    BusDetailRequest::handler(id)?.provider(&ctx).owner(OWNER).await.map_err(Into::into)
}

#[axum::debug_handler]
async fn search(
    State(ctx): State<AppContext>, Query(query): Query<SearchQuery>,
) -> HttpResult<Reply<SearchReply>> {
    SearchRequest::handler(query)?.provider(&ctx).owner(OWNER).await.map_err(Into::into)
}

#[axum::debug_handler]
async fn search_buses(
    State(ctx): State<AppContext>, Query(query): Query<SearchQuery>,
) -> HttpResult<Reply<Vec<BusSummary>>> {
    SearchBusesRequest::handler(query)?.provider(&ctx).owner(OWNER).await.map_err(Into::into)
}

#[axum::debug_handler]
async fn trips(State(ctx): State<AppContext>, body: String) -> HttpResult<Reply<BookingConfirmation>> {
    TripRequest::handler(body)?.provider(&ctx).owner(OWNER).await.map_err(Into::into)
}

#[derive(Debug, Deserialize)]
struct FleetQuery {
    source: Option<String>,
}

#[axum::debug_handler]
async fn fleet(
    State(ctx): State<AppContext>, Query(query): Query<FleetQuery>,
) -> HttpResult<Reply<FleetReport>> {
    FleetRequest::handler(query.source)?.provider(&ctx).owner(OWNER).await.map_err(Into::into)
}

#[axum::debug_handler]
async fn bus_analytics(
    State(ctx): State<AppContext>, Path(id): Path<String>,
) -> HttpResult<Reply<BusAnalytics>> {
    BusAnalyticsRequest::handler(id)?.provider(&ctx).owner(OWNER).await.map_err(Into::into)
}

#[axum::debug_handler]
async fn favorites(State(ctx): State<AppContext>) -> HttpResult<Reply<Vec<BusSummary>>> {
    FavoritesRequest::handler(())?.provider(&ctx).owner(OWNER).await.map_err(Into::into)
}
