use std::process::ExitCode;

use edge_gateway::api_service::{self, ServiceIdentity};
use edge_gateway::config::env::{parse_with, process_env, resolve};
use edge_gateway::config::{ListenerConfig, ObservabilityConfig};
use edge_gateway::lifecycle::signals;
use edge_gateway::net;
use edge_gateway::observability::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let observability = ObservabilityConfig {
        log_level: resolve("LOG_LEVEL", "info"),
        ..ObservabilityConfig::default()
    };
    if let Err(e) = logging::init(&observability) {
        eprintln!("{}", e);
    }

    let port = match parse_with(process_env, "PORT", 80u16) {
        Ok(port) => port,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    let listener_config = ListenerConfig {
        port,
        ..ListenerConfig::default()
    };

    let identity = ServiceIdentity::from_lookup(process_env);
    tracing::info!(service = %identity.name, port, "API service starting");

    let listener = match net::bind(&listener_config).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, "Failed to start");
            return ExitCode::FAILURE;
        }
    };

    let served = axum::serve(listener, api_service::router(identity))
        .with_graceful_shutdown(signals::shutdown_signal())
        .await;

    match served {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "API service stopped");
            ExitCode::FAILURE
        }
    }
}
