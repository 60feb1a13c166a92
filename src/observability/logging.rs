//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Compact format by default, pretty for development, JSON for log shipping
//! - `RUST_LOG` wins over the configured level

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::{LogFormat, ObservabilityConfig};

/// Error raised when a global subscriber is already installed.
#[derive(Debug, thiserror::Error)]
#[error("failed to initialize logging: {0}")]
pub struct LoggingError(String);

/// Install the global tracing subscriber.
pub fn init(config: &ObservabilityConfig) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.log_level)));

    let layer = match config.log_format {
        LogFormat::Compact => fmt::layer().compact().with_target(true).boxed(),
        LogFormat::Pretty => fmt::layer().pretty().with_target(true).boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .flatten_event(true)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(layer.with_filter(filter))
        .try_init()
        .map_err(|e| LoggingError(e.to_string()))
}

/// `level` for this crate and tower_http's request spans, warn elsewhere.
fn default_directives(level: &str) -> String {
    format!("warn,edge_gateway={level},api_service={level},tower_http={level}", level = level)
}
