//! TCP listener binding.
//!
//! # Responsibilities
//! - Resolve the configured bind address
//! - Bind, reporting the address alongside the OS error on failure

use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::config::ListenerConfig;

/// Error type for listener operations.
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    /// The configured host/port does not form a socket address.
    #[error("invalid bind address `{address}`: {source}")]
    Address {
        address: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// Failed to bind to address.
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// Bind the listener described by `config`.
pub async fn bind(config: &ListenerConfig) -> Result<TcpListener, ListenerError> {
    let address = config.bind_address();
    let addr: SocketAddr = address
        .parse()
        .map_err(|source| ListenerError::Address { address, source })?;

    bind_addr(addr).await
}

/// Bind a concrete socket address.
pub async fn bind_addr(addr: SocketAddr) -> Result<TcpListener, ListenerError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ListenerError::Bind { address: addr, source })?;

    tracing::info!(
        address = %listener.local_addr().unwrap_or(addr),
        "Listener bound"
    );

    Ok(listener)
}
