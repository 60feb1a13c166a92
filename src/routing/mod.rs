//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → path.rs (percent-decode for matching)
//!     → router.rs (health check, then ordered prefix scan, then fallback)
//!     → matcher.rs (literal prefix test and strip)
//!     → path.rs (re-encode a stripped remainder)
//!     → Return: Dispatch::Health or Dispatch::Forward { route, path }
//!
//! Route Compilation (at startup):
//!     RouteConfig[] + fallback
//!     → Build one Upstream per route (fails on malformed URL)
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex, no trie: a short ordered list scanned top to bottom
//! - Deterministic: same input always matches same route
//! - First match wins in configuration order, not longest match

pub mod matcher;
pub mod path;
pub mod router;

pub use router::{Dispatch, Route, RouteTable};
