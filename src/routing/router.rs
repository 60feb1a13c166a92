//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes and their upstreams
//! - Classify each request path: health, a prefix route, or the fallback
//! - Hand back the path the upstream should see
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) prefix scan in configuration order; first match wins, even when a
//!   later prefix is longer
//! - The fallback always matches and never strips
//! - Matching runs on the percent-decoded path; a stripped remainder is
//!   re-encoded, a path forwarded whole keeps its original bytes

use std::borrow::Cow;
use std::sync::Arc;

use crate::config::{ConfigError, GatewayConfig, RouteConfig};
use crate::proxy::Upstream;
use crate::routing::matcher::PathPrefixMatcher;
use crate::routing::path;

/// A compiled route bound to its upstream.
#[derive(Debug, Clone)]
pub struct Route {
    name: String,
    matcher: PathPrefixMatcher,
    strip_prefix: bool,
    upstream: Arc<Upstream>,
}

impl Route {
    /// Compile a route, validating its upstream URL.
    pub fn from_config(config: &RouteConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            name: config.name.clone(),
            matcher: PathPrefixMatcher::new(config.prefix.clone()),
            strip_prefix: config.strip_prefix,
            upstream: Arc::new(Upstream::parse(&config.name, &config.upstream)?),
        })
    }

    fn fallback(name: &str, upstream: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            name: name.to_string(),
            matcher: PathPrefixMatcher::new("/"),
            strip_prefix: false,
            upstream: Arc::new(Upstream::parse(name, upstream)?),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prefix(&self) -> &str {
        self.matcher.prefix()
    }

    pub fn strips_prefix(&self) -> bool {
        self.strip_prefix
    }

    pub fn upstream(&self) -> &Upstream {
        &self.upstream
    }

    /// The wire path to forward if this route claims `decoded`.
    ///
    /// `raw` is the path as received. With `reencode` unset, `decoded` is
    /// `raw` itself and a remainder is forwarded as-is.
    fn claim<'a>(&self, raw: &'a str, decoded: &str, reencode: bool) -> Option<Cow<'a, str>> {
        let rest = self.matcher.strip(decoded)?;
        Some(match (self.strip_prefix, reencode) {
            (false, _) => Cow::Borrowed(raw),
            (true, true) => Cow::Owned(path::encode(rest).into_owned()),
            (true, false) => Cow::Owned(rest.to_string()),
        })
    }
}

/// Outcome of routing one request.
#[derive(Debug, Clone)]
pub enum Dispatch<'a> {
    /// The reserved liveness path; answer locally.
    Health,
    /// Proxy to `route`'s upstream with `path` as the new, encoded path.
    Forward { route: &'a Route, path: Cow<'a, str> },
}

/// The immutable routing table built once at startup.
#[derive(Debug)]
pub struct RouteTable {
    health_path: String,
    routes: Vec<Route>,
    fallback: Route,
}

impl RouteTable {
    /// Compile the table. Any malformed upstream URL aborts construction.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, ConfigError> {
        let routes = config
            .routes
            .iter()
            .map(Route::from_config)
            .collect::<Result<Vec<_>, _>>()?;
        let fallback = Route::fallback(&config.fallback.name, &config.fallback.upstream)?;

        Ok(Self {
            health_path: config.health.path.clone(),
            routes,
            fallback,
        })
    }

    /// Classify the request path `raw`, as received on the wire.
    ///
    /// A path that does not decode to UTF-8 is matched undecoded.
    pub fn dispatch<'a>(&'a self, raw: &'a str) -> Dispatch<'a> {
        let (decoded, reencode) = match path::decode(raw) {
            Some(decoded) => (decoded, true),
            None => (Cow::Borrowed(raw), false),
        };

        if decoded == self.health_path {
            return Dispatch::Health;
        }

        for route in &self.routes {
            if let Some(path) = route.claim(raw, &decoded, reencode) {
                return Dispatch::Forward { route, path };
            }
        }

        Dispatch::Forward {
            route: &self.fallback,
            path: Cow::Borrowed(raw),
        }
    }

    /// Prefix routes in evaluation order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn fallback(&self) -> &Route {
        &self.fallback
    }

    pub fn health_path(&self) -> &str {
        &self.health_path
    }
}
