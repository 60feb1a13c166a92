//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! built-in defaults (schema.rs)
//!     → optional TOML file (loader.rs, --config / GATEWAY_CONFIG)
//!     → environment overrides (env.rs, e.g. GO_BACKEND_URL, PORT)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → compiled once into the RouteTable
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no hot reload
//! - All fields have defaults so an empty environment is a valid deployment
//! - Unset and empty environment values are the same thing

pub mod env;
pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    FallbackConfig, GatewayConfig, HealthConfig, HealthFormat, ListenerConfig, LogFormat,
    ObservabilityConfig, RouteConfig, TimeoutConfig,
};
