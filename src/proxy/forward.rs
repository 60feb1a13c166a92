//! The reverse-proxy primitive shared by every upstream.
//!
//! # Responsibilities
//! - Point the request at the upstream's origin, keeping the routed path
//! - Strip hop-by-hop headers both ways, record the client in X-Forwarded-For
//! - Stream bodies through without buffering
//! - Bound the wait for the upstream's response head
//!
//! # Design Decisions
//! - One pooled client for all upstreams; idle connections are reused
//! - The inbound Host header is passed through untouched; an HTTP/2
//!   `:authority` stands in for it
//! - No retries: a failed attempt is reported to the caller as-is

use std::net::IpAddr;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, Version},
    response::Response,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::TimeoutConfig;
use crate::proxy::error::ProxyError;
use crate::proxy::headers::{
    append_forwarded_for, preserve_host, strip_hop_by_hop, strip_request_hop_by_hop,
};
use crate::proxy::upstream::Upstream;

/// Forwards requests to upstreams over a shared connection pool.
#[derive(Clone)]
pub struct Forwarder {
    client: Client<HttpConnector, Body>,
    upstream_timeout: Duration,
}

impl Forwarder {
    pub fn new(timeouts: &TimeoutConfig) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(timeouts.connect_secs)));

        let client = Client::builder(TokioExecutor::new()).build(connector);

        Self {
            client,
            upstream_timeout: Duration::from_secs(timeouts.upstream_secs),
        }
    }

    /// Send `request` to `upstream` with its path replaced by `path`.
    ///
    /// `client` is the peer address of the inbound connection, when known.
    pub async fn forward(
        &self,
        upstream: &Upstream,
        path: &str,
        client: Option<IpAddr>,
        request: Request<Body>,
    ) -> Result<Response, ProxyError> {
        let (mut parts, body) = request.into_parts();

        preserve_host(&mut parts.headers, &parts.uri);
        parts.uri = upstream.rewrite(path, parts.uri.query())?;
        // The pool speaks HTTP/1.1 to upstreams whatever the client used.
        parts.version = Version::HTTP_11;
        strip_request_hop_by_hop(&mut parts.headers);
        if let Some(ip) = client {
            append_forwarded_for(&mut parts.headers, ip);
        }

        let outbound = Request::from_parts(parts, body);
        let response = tokio::time::timeout(self.upstream_timeout, self.client.request(outbound))
            .await
            .map_err(|_| ProxyError::Timeout(self.upstream_timeout))??;

        let (mut parts, body) = response.into_parts();
        strip_hop_by_hop(&mut parts.headers);
        Ok(Response::from_parts(parts, Body::new(body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;

    use axum::http::StatusCode;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Accepts one connection and hands back its request head, lowercased.
    async fn capture_upstream() -> (SocketAddr, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let _ = tx.send(String::from_utf8_lossy(&buf).to_lowercase());
            socket
                .write_all(b"HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n")
                .await
                .unwrap();
        });

        (addr, rx)
    }

    #[tokio::test]
    async fn test_http2_request_keeps_client_authority() {
        let (addr, head) = capture_upstream().await;
        let upstream = Upstream::parse("go", &format!("http://{}", addr)).unwrap();
        let forwarder = Forwarder::new(&TimeoutConfig::default());

        let request = Request::builder()
            .version(Version::HTTP_2)
            .uri("http://gateway.example/services/go-apis/orders?id=1")
            .header("te", "trailers")
            .body(Body::empty())
            .unwrap();

        let response = forwarder
            .forward(&upstream, "/orders", Some("10.1.2.3".parse().unwrap()), request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(!response.headers().contains_key("connection"));

        let head = head.await.unwrap();
        let lines: Vec<&str> = head.split("\r\n").collect();
        assert_eq!(lines[0], "get /orders?id=1 http/1.1");
        assert!(lines.contains(&"host: gateway.example"), "{}", head);
        assert!(lines.contains(&"te: trailers"), "{}", head);
        assert!(lines.contains(&"x-forwarded-for: 10.1.2.3"), "{}", head);
    }
}
