//! Startup orchestration.
//!
//! # Responsibilities
//! - Compile the route table (validates every upstream URL)
//! - Log the operator banner
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is returned before traffic is accepted
//! - Listener binds last (traffic only when ready)
//! - Exiting the process is left to the caller

use tokio::sync::broadcast;

use crate::config::{ConfigError, GatewayConfig};
use crate::http::HttpServer;
use crate::net::{self, ListenerError};
use crate::routing::RouteTable;

/// Why the gateway could not start or stopped abnormally.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Compile the route table without binding anything.
///
/// Backs `--check`: every upstream URL is validated exactly as at startup.
pub fn check(config: &GatewayConfig) -> Result<RouteTable, StartupError> {
    let table = RouteTable::from_config(config)?;
    log_route_table(&table);
    Ok(table)
}

/// Build, bind and run the gateway until `shutdown` fires.
pub async fn run(config: GatewayConfig, shutdown: broadcast::Receiver<()>) -> Result<(), StartupError> {
    let server = HttpServer::new(&config)?;
    log_route_table(server.routes());

    let listener = net::bind(&config.listener).await?;
    tracing::info!(port = config.listener.port, "Starting API Gateway");

    server.run(listener, shutdown).await.map_err(StartupError::Serve)
}

fn log_route_table(table: &RouteTable) {
    for route in table.routes() {
        tracing::info!(
            route = route.name(),
            prefix = route.prefix(),
            upstream = %route.upstream(),
            strip_prefix = route.strips_prefix(),
            "Route"
        );
    }
    tracing::info!(
        route = table.fallback().name(),
        prefix = "/*",
        upstream = %table.fallback().upstream(),
        "Fallback route"
    );
    tracing::info!(path = table.health_path(), "Health endpoint");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::Shutdown;

    #[test]
    fn test_check_accepts_default_table() {
        let table = check(&GatewayConfig::default()).unwrap();
        assert_eq!(table.routes().len(), 3);
        assert_eq!(table.fallback().name(), "frontend");
    }

    #[test]
    fn test_check_rejects_malformed_upstream() {
        let mut config = GatewayConfig::default();
        config.fallback.upstream = "https://frontend".into();

        let err = check(&config).unwrap_err();
        assert!(matches!(
            err,
            StartupError::Config(ConfigError::InvalidUpstream { ref name, .. }) if name == "frontend"
        ));
    }

    #[tokio::test]
    async fn test_malformed_upstream_stops_startup() {
        let mut config = GatewayConfig::default();
        config.listener.host = "127.0.0.1".into();
        config.listener.port = 0;
        config.routes[1].upstream = "rust-api".into();

        let shutdown = Shutdown::new();
        let err = run(config, shutdown.subscribe()).await.unwrap_err();
        assert!(matches!(err, StartupError::Config(ConfigError::InvalidUpstream { .. })));
    }

    #[tokio::test]
    async fn test_shutdown_stops_server() {
        let mut config = GatewayConfig::default();
        config.listener.host = "127.0.0.1".into();
        config.listener.port = 0;

        let shutdown = Shutdown::new();
        let handle = tokio::spawn(run(config, shutdown.subscribe()));
        tokio::task::yield_now().await;
        shutdown.trigger();

        let result = tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .expect("server did not stop")
            .unwrap();
        assert!(result.is_ok());
    }
}
