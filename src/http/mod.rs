//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace span)
//!     → routing layer classifies the path
//!     → health.rs answers the reserved health path
//!     → proxy layer forwards everything else
//!     → Send upstream response to client
//! ```

pub mod health;
pub mod server;

pub use server::{AppState, HttpServer, X_REQUEST_ID};
