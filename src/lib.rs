//! # SmartRide
//!
//! HTTP service for the SmartRide mock transit endpoints.

pub mod config;
mod http;
mod provider;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

pub use crate::http::router;
pub use crate::provider::AppContext;

/// Serve the mock endpoints on `listener` until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error when the server fails.
pub async fn serve(
    listener: TcpListener, ctx: AppContext, shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let addr = listener.local_addr().context("reading local address")?;
    info!(addr = %addr, "smartride listening");

    axum::serve(listener, router(ctx)).with_graceful_shutdown(shutdown).await.context("serving")
}
