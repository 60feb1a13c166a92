//! Upstream handles: one per configured backend base URL.
//!
//! # Responsibilities
//! - Validate the base URL once, at startup
//! - Rewrite a routed path + query onto the upstream's origin
//!
//! # Design Decisions
//! - Only plain `http` upstreams; the gateway carries no TLS connector
//! - Path joining uses single-slash semantics so `""` lands as `/` and
//!   `foo` as `/foo` on the wire

use std::fmt;
use std::str::FromStr;

use axum::http::uri::{Authority, PathAndQuery, Scheme};
use axum::http::Uri;
use url::Url;

use crate::config::ConfigError;
use crate::proxy::error::ProxyError;

/// An immutable, validated upstream base URL.
#[derive(Debug, Clone)]
pub struct Upstream {
    name: String,
    url: String,
    authority: Authority,
    base_path: String,
    base_query: Option<String>,
}

impl Upstream {
    /// Build an upstream from its base URL.
    ///
    /// Fails on anything that is not an absolute `http://host[:port][/path]`
    /// URL. Raw control characters are rejected outright rather than being
    /// silently dropped by the URL parser.
    pub fn parse(name: &str, raw: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidUpstream {
            name: name.to_string(),
            url: raw.to_string(),
            reason,
        };

        if raw.chars().any(char::is_control) {
            return Err(invalid("contains a control character".to_string()));
        }

        let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
        if url.scheme() != "http" {
            return Err(invalid(format!("unsupported scheme `{}`", url.scheme())));
        }
        let host = match url.host_str() {
            Some(host) if !host.is_empty() => host,
            _ => return Err(invalid("missing host".to_string())),
        };
        let authority = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
        let authority = Authority::from_str(&authority).map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            name: name.to_string(),
            url: raw.to_string(),
            authority,
            base_path: url.path().to_string(),
            base_query: url.query().filter(|q| !q.is_empty()).map(str::to_string),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The base URL as configured.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    /// Absolute URI for `path` (encoded, as handed over by the router) and
    /// the inbound query string.
    pub fn rewrite(&self, path: &str, query: Option<&str>) -> Result<Uri, ProxyError> {
        let mut target = join_paths(&self.base_path, path);

        let query = query.filter(|q| !q.is_empty());
        match (self.base_query.as_deref(), query) {
            (Some(base), Some(query)) => {
                target.push('?');
                target.push_str(base);
                target.push('&');
                target.push_str(query);
            }
            (Some(query), None) | (None, Some(query)) => {
                target.push('?');
                target.push_str(query);
            }
            (None, None) => {}
        }

        let path_and_query = PathAndQuery::from_str(&target).map_err(axum::http::Error::from)?;
        Ok(Uri::builder()
            .scheme(Scheme::HTTP)
            .authority(self.authority.clone())
            .path_and_query(path_and_query)
            .build()?)
    }
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Join two path fragments with exactly one `/` between them.
pub fn join_paths(base: &str, path: &str) -> String {
    match (base.ends_with('/'), path.starts_with('/')) {
        (true, true) => format!("{}{}", base, &path[1..]),
        (false, false) => format!("{}/{}", base, path),
        _ => format!("{}{}", base, path),
    }
}
