//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from an optional TOML
//! file; every field has a default so that a bare environment is enough.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Root configuration for the edge gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind host and port).
    pub listener: ListenerConfig,

    /// Ordered prefix routes. Evaluated top to bottom, first match wins.
    pub routes: Vec<RouteConfig>,

    /// Upstream receiving every request no route claims.
    pub fallback: FallbackConfig,

    /// Reserved liveness endpoint.
    pub health: HealthConfig,

    /// Upstream timeouts.
    pub timeouts: TimeoutConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            routes: default_routes(),
            fallback: FallbackConfig::default(),
            health: HealthConfig::default(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// The in-cluster route table the gateway ships with.
pub fn default_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig::new("php", "/services/php-apis", "http://php-api")
            .with_upstream_env("PHP_BACKEND_URL"),
        RouteConfig::new("rust", "/services/rust-apis", "http://rust-api")
            .with_upstream_env("RUST_BACKEND_URL"),
        RouteConfig::new("go", "/services/go-apis", "http://go-api")
            .with_upstream_env("GO_BACKEND_URL"),
    ]
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port. Overridden by `PORT`.
    pub port: u16,
}

impl ListenerConfig {
    /// `host:port` string suitable for parsing into a socket address.
    pub fn bind_address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 80,
        }
    }
}

/// A prefix route mapping requests to one upstream.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RouteConfig {
    /// Route identifier for logging.
    pub name: String,

    /// Literal path prefix to match (plain string prefix, not segment aware).
    pub prefix: String,

    /// Upstream base URL (e.g., "http://go-api").
    pub upstream: String,

    /// Remove the matched prefix before forwarding.
    #[serde(default = "default_strip_prefix")]
    pub strip_prefix: bool,

    /// Environment variable that overrides `upstream` when set and non-empty.
    #[serde(default)]
    pub upstream_env: Option<String>,
}

fn default_strip_prefix() -> bool {
    true
}

impl RouteConfig {
    /// A stripping route without an environment override.
    pub fn new(name: impl Into<String>, prefix: impl Into<String>, upstream: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
            upstream: upstream.into(),
            strip_prefix: true,
            upstream_env: None,
        }
    }

    pub fn with_upstream_env(mut self, key: impl Into<String>) -> Self {
        self.upstream_env = Some(key.into());
        self
    }
}

/// Fallback (frontend) upstream.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Identifier used in logs.
    pub name: String,

    /// Upstream base URL.
    pub upstream: String,

    /// Environment variable that overrides `upstream`.
    pub upstream_env: Option<String>,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            name: "frontend".to_string(),
            upstream: "http://frontend".to_string(),
            upstream_env: Some("FRONTEND_URL".to_string()),
        }
    }
}

/// Body shape of the liveness response.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum HealthFormat {
    /// `{"status":"ok","service":"<name>"}`
    #[default]
    Json,
    /// `OK\n`
    Plain,
}

impl FromStr for HealthFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "plain" | "text" => Ok(Self::Plain),
            other => Err(format!("expected `json` or `plain`, got `{}`", other)),
        }
    }
}

/// Liveness endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Reserved path answered by the gateway itself.
    pub path: String,

    /// Response body variant.
    pub format: HealthFormat,

    /// `service` field of the JSON body.
    pub service: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            path: "/health".to_string(),
            format: HealthFormat::Json,
            service: "go-gateway".to_string(),
        }
    }
}

/// Timeout configuration for upstream calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Time allowed for the upstream to return a response head, in seconds.
    pub upstream_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            upstream_secs: 30,
        }
    }
}

/// Log output style.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `compact`, `pretty` or `json`, got `{}`", other)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Compact => "compact",
            Self::Pretty => "pretty",
            Self::Json => "json",
        };
        f.write_str(name)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    pub log_level: String,

    /// Output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Compact,
        }
    }
}
