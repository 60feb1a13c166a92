//! Per-request forwarding failures and their client-facing status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Why a request could not be proxied. None of these are fatal to the
/// process; each maps to a gateway-style response for the caller.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// Connect, write or read failure talking to the upstream.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),

    /// The upstream did not produce a response head in time.
    #[error("upstream did not respond within {0:?}")]
    Timeout(std::time::Duration),

    /// The rewritten request could not be assembled.
    #[error("failed to build upstream request: {0}")]
    Request(#[from] axum::http::Error),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::Upstream(_) | ProxyError::Request(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = match self {
            ProxyError::Timeout(_) => "Upstream timed out",
            ProxyError::Upstream(_) | ProxyError::Request(_) => "Upstream request failed",
        };
        (self.status(), body).into_response()
    }
}
