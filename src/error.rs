//! Errors raised while forwarding a single request.
//!
//! Every variant terminates the request. Only [`ForwardError::InvalidUrl`]
//! exposes detail to the caller; the 500 variants are logged in full and
//! answered with a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Body returned for every internal failure that is not a panic.
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// Failure of the forwarding pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    /// The path did not decode to an `http`/`https` URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The derived URL could not be parsed.
    #[error("failed to parse target url: {0}")]
    InvalidTarget(#[from] url::ParseError),

    /// The outbound request could not be assembled.
    #[error("failed to build upstream request: {0}")]
    Build(#[source] reqwest::Error),

    /// Connecting to or talking with the upstream failed.
    #[error("upstream request failed: {0}")]
    Dispatch(#[source] reqwest::Error),
}

impl ForwardError {
    /// HTTP status reported to the caller.
    pub fn status(&self) -> StatusCode {
        match self {
            ForwardError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            ForwardError::InvalidTarget(_)
            | ForwardError::Build(_)
            | ForwardError::Dispatch(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ForwardError {
    fn into_response(self) -> Response {
        match self {
            ForwardError::InvalidUrl(_) => {
                tracing::debug!(error = %self, "Rejected request");
                (self.status(), self.to_string()).into_response()
            }
            _ => {
                tracing::error!(error = %self, "Internal server error");
                (self.status(), INTERNAL_SERVER_ERROR).into_response()
            }
        }
    }
}
