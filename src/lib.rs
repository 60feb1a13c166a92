//! Edge gateway library.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ net::listener ──▶ http::server ──▶ routing::RouteTable
//!                                            │                 │
//!                                            │   /health       │ first matching prefix
//!                                            ▼                 ▼ (or fallback)
//!                                      http::health      proxy::Forwarder ──▶ Upstream
//!     Client Response                                          │
//!     ◀────────────────────────────────────────────────────────┘
//! ```
//!
//! `api_service` is the placeholder backend shipped alongside the gateway.

pub mod api_service;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod proxy;
pub mod routing;

pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
