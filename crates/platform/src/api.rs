//! # Api
//!
//! Request/reply plumbing shared by handlers. A request type implements
//! [`Handler`] for any provider that supplies the capabilities it needs; the
//! caller binds a provider and an owner and awaits the reply:
//!
//! ```rust,ignore
//! let reply = Client::new(provider).request(SearchRequest::new(query)).owner("owner").await?;
//! ```

use std::future::IntoFuture;
use std::marker::PhantomData;

use axum::Json;
use axum::response::{IntoResponse, Response};
use futures::future::BoxFuture;
use http::StatusCode;
use serde::Serialize;

use crate::error::Result;

/// Handler execution context.
#[derive(Debug)]
pub struct Context<'a, P> {
    /// Name of the calling tenant, used for logging.
    pub owner: &'a str,
    pub provider: &'a P,
}

/// A request that can be handled with provider `P`.
pub trait Handler<P>: Sized + Send {
    /// Raw input the request is built from (path segment, query, body).
    type Input;
    type Output: Serialize + Send;

    /// Build and validate a request from raw input.
    ///
    /// # Errors
    ///
    /// Returns a `BadRequest` error when the input is invalid.
    fn from_input(input: Self::Input) -> Result<Self>;

    /// Validate `input` and wait for a provider to bind.
    ///
    /// # Errors
    ///
    /// Returns the error raised by [`Handler::from_input`].
    fn handler(input: Self::Input) -> Result<Pending<Self, P>> {
        Ok(Pending { request: Self::from_input(input)?, provider: PhantomData })
    }

    fn handle(
        self, ctx: Context<'_, P>,
    ) -> impl Future<Output = Result<Reply<Self::Output>>> + Send;
}

/// A validated request not yet bound to a provider.
#[derive(Debug)]
pub struct Pending<R, P> {
    request: R,
    provider: PhantomData<fn() -> P>,
}

impl<R, P> Pending<R, P> {
    pub fn provider(self, provider: &P) -> Dispatch<'_, R, P> {
        Dispatch::new(self.request, provider)
    }
}

/// Handler reply.
#[derive(Debug, Clone)]
pub struct Reply<T> {
    pub status: StatusCode,
    pub body: T,
}

impl<T> From<T> for Reply<T> {
    fn from(body: T) -> Self {
        Self { status: StatusCode::OK, body }
    }
}

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Binds requests to a provider.
#[derive(Debug, Clone)]
pub struct Client<P> {
    provider: P,
}

impl<P> Client<P> {
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Start a request against this client's provider.
    pub const fn request<R>(&self, request: R) -> Dispatch<'_, R, P> {
        Dispatch { request, provider: &self.provider, owner: "" }
    }
}

/// A request bound to a provider, ready to be awaited.
#[derive(Debug)]
pub struct Dispatch<'a, R, P> {
    request: R,
    provider: &'a P,
    owner: &'a str,
}

impl<'a, R, P> Dispatch<'a, R, P> {
    /// Bind `request` to `provider` directly.
    pub const fn new(request: R, provider: &'a P) -> Self {
        Self { request, provider, owner: "" }
    }

    #[must_use]
    pub const fn owner(mut self, owner: &'a str) -> Self {
        self.owner = owner;
        self
    }
}

impl<'a, R, P> IntoFuture for Dispatch<'a, R, P>
where
    R: Handler<P> + 'a,
    P: Sync + 'a,
{
    type IntoFuture = BoxFuture<'a, Self::Output>;
    type Output = Result<Reply<R::Output>>;

    fn into_future(self) -> Self::IntoFuture {
        let ctx = Context { owner: self.owner, provider: self.provider };
        Box::pin(self.request.handle(ctx))
    }
}
