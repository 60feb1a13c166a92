//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the gateway handler
//! - Wire up middleware (request ID, tracing)
//! - Bind server to listener, stop on the shutdown signal
//! - Dispatch requests to the route table
//! - Answer the health path locally, forward everything else

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderName, Request},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::{ConfigError, GatewayConfig, HealthConfig};
use crate::http::health;
use crate::proxy::Forwarder;
use crate::routing::{Dispatch, RouteTable};

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<RouteTable>,
    pub forwarder: Forwarder,
    pub health: Arc<HealthConfig>,
}

/// HTTP server for the edge gateway.
pub struct HttpServer {
    router: Router,
    table: Arc<RouteTable>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Builds every upstream up front; a malformed URL is returned as an
    /// error before anything is bound.
    pub fn new(config: &GatewayConfig) -> Result<Self, ConfigError> {
        let table = Arc::new(RouteTable::from_config(config)?);

        let state = AppState {
            table: table.clone(),
            forwarder: Forwarder::new(&config.timeouts),
            health: Arc::new(config.health.clone()),
        };

        Ok(Self {
            router: Self::build_router(state),
            table,
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(gateway_handler))
            .route("/", any(gateway_handler))
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get(X_REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id,
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The compiled route table.
    pub fn routes(&self) -> &RouteTable {
        &self.table
    }

    /// A handle to the router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires. In-flight requests are drained before returning.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main gateway handler.
/// Answers the health path, otherwise forwards to the matched upstream.
async fn gateway_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let raw_path = request.uri().path().to_owned();

    let (route, path) = match state.table.dispatch(&raw_path) {
        Dispatch::Health => return health::respond(&state.health),
        Dispatch::Forward { route, path } => (route, path),
    };

    tracing::debug!(
        route = route.name(),
        upstream = %route.upstream(),
        forwarded_path = %path,
        "Forwarding request"
    );

    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    match state.forwarder.forward(route.upstream(), &path, client, request).await {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(
                route = route.name(),
                upstream = %route.upstream(),
                status = err.status().as_u16(),
                error = %err,
                "Upstream request failed"
            );
            err.into_response()
        }
    }
}
