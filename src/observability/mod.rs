//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!     → tower_http request spans carrying the request ID
//!
//! Consumers:
//!     → logging.rs (fmt subscriber to stdout: compact, pretty or JSON)
//! ```

pub mod logging;
