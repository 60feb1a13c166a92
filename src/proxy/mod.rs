//! Upstream proxying subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     base URL string → upstream.rs (validate, decompose) → Upstream
//!
//! Per request:
//!     (Upstream, routed path, Request)
//!     → upstream.rs (rewrite URI: origin + joined path + merged query)
//!     → headers.rs (drop hop-by-hop, append X-Forwarded-For)
//!     → forward.rs (pooled hyper client, response-head timeout)
//!     → Response streamed back, or ProxyError → 502 / 504
//! ```

pub mod error;
pub mod forward;
pub mod headers;
pub mod upstream;

pub use error::ProxyError;
pub use forward::Forwarder;
pub use upstream::Upstream;
