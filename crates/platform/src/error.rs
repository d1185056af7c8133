//! SmartRide service errors

use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across the crate.
pub type Result<T> = anyhow::Result<T, Error>;

/// Domain level error type returned at the service boundary.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Error {
    /// The request payload or query is invalid.
    #[error("code: 400, description: {0}")]
    BadRequest(String),

    /// No active session for an operation that requires one.
    #[error("code: 401, description: {0}")]
    Unauthorized(String),

    /// The requested resource could not be found.
    #[error("code: 404, description: {0}")]
    NotFound(String),

    /// A pending task was cancelled before it completed.
    #[error("code: 499, description: cancelled {0}")]
    Cancelled(String),

    /// A non recoverable internal error occurred.
    #[error("code: 500, description: {0}")]
    Internal(String),

    /// Stored or received data could not be decoded.
    #[error("code: 500, description: invalid_format {0}")]
    InvalidFormat(String),
}

impl Error {
    /// Returns the stable error code associated with the variant.
    #[must_use]
    pub fn code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Cancelled(_) => {
                StatusCode::from_u16(499).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::Internal(_) | Self::InvalidFormat(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error description.
    #[must_use]
    pub fn description(&self) -> String {
        self.to_string()
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        let chain = err.chain().map(ToString::to_string).collect::<Vec<_>>().join(" -> ");

        // keep the variant, carry the context chain
        if let Some(inner) = err.downcast_ref::<Self>() {
            tracing::debug!("Error: {err}, caused by: {inner}");

            return match inner {
                Self::BadRequest(_) => Self::BadRequest(chain),
                Self::Unauthorized(_) => Self::Unauthorized(chain),
                Self::NotFound(_) => Self::NotFound(chain),
                Self::Internal(_) => Self::Internal(chain),
                Self::Cancelled(e) => Self::Cancelled(format!("{err}: {e}")),
                Self::InvalidFormat(e) => Self::InvalidFormat(format!("{err}: {e}")),
            };
        }

        Self::Internal(chain)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidFormat(err.to_string())
    }
}

/// Error wrapper returned from axum handlers.
pub struct HttpError {
    status: StatusCode,
    error: String,
}

impl From<Error> for HttpError {
    fn from(e: Error) -> Self {
        Self { status: e.code(), error: e.to_string() }
    }
}

impl From<anyhow::Error> for HttpError {
    fn from(e: anyhow::Error) -> Self {
        let error = format!("{e}, caused by: {}", e.root_cause());
        let status = e.downcast_ref().map_or(StatusCode::INTERNAL_SERVER_ERROR, Error::code);
        Self { status, error }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, self.error).into_response()
    }
}

/// Result type for axum handlers.
pub type HttpResult<T> = std::result::Result<T, HttpError>;

#[macro_export]
macro_rules! bad_request {
    ($fmt:expr, $($arg:tt)*) => {
        $crate::Error::BadRequest(format!($fmt, $($arg)*))
    };
     ($err:expr $(,)?) => {
        $crate::Error::BadRequest(format!($err))
    };
}

#[macro_export]
macro_rules! not_found {
    ($fmt:expr, $($arg:tt)*) => {
        $crate::Error::NotFound(format!($fmt, $($arg)*))
    };
     ($err:expr $(,)?) => {
        $crate::Error::NotFound(format!($err))
    };
}

#[macro_export]
macro_rules! unauthorized {
    ($fmt:expr, $($arg:tt)*) => {
        $crate::Error::Unauthorized(format!($fmt, $($arg)*))
    };
     ($err:expr $(,)?) => {
        $crate::Error::Unauthorized(format!($err))
    };
}
