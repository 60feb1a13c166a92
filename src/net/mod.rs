//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! ListenerConfig (host, port)
//!     → listener.rs (parse address, bind)
//!     → TcpListener handed to the HTTP layer
//! ```
//!
//! # Design Decisions
//! - A bind failure is reported, never retried; the caller decides to exit
//! - Connection scheduling is left to the HTTP server runtime

pub mod listener;

pub use listener::{bind, ListenerError};
