use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use edge_gateway::config::{load_config, ObservabilityConfig};
use edge_gateway::lifecycle::{self, signals, Shutdown};
use edge_gateway::observability::logging;

#[derive(Parser)]
#[command(name = "edge-gateway")]
#[command(about = "Path-prefix HTTP edge gateway", long_about = None)]
struct Cli {
    /// Optional TOML file with listener, route and health settings.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Validate the configuration and upstream URLs, then exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config_path = cli.config.filter(|p| !p.as_os_str().is_empty());

    let config = match load_config(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            let _ = logging::init(&ObservabilityConfig::default());
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init(&config.observability) {
        eprintln!("{}", e);
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "edge-gateway starting");

    if cli.check {
        return match lifecycle::check(&config) {
            Ok(table) => {
                tracing::info!(routes = table.routes().len(), "Configuration is valid");
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!(error = %e, "Invalid configuration");
                ExitCode::FAILURE
            }
        };
    }

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::shutdown_signal().await;
        shutdown.trigger();
    });

    match lifecycle::run(config, server_shutdown).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Gateway stopped");
            ExitCode::FAILURE
        }
    }
}
