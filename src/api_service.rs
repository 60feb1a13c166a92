//! Placeholder API service.
//!
//! A stand-in backend the gateway can route to: a liveness endpoint and a
//! catch-all that echoes the decoded request path. No business logic.

use axum::{extract::State, http::Uri, routing::any, Json, Router};
use percent_encoding::percent_decode_str;
use serde::Serialize;

use crate::config::env::resolve_with;

/// Identity reported by the service's responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceIdentity {
    pub name: String,
    /// Omitted from the health body when empty.
    pub version: String,
    pub greeting: String,
}

impl Default for ServiceIdentity {
    fn default() -> Self {
        Self {
            name: "go-api-service".to_string(),
            version: "0.0.0".to_string(),
            greeting: "Hello from Go API Service".to_string(),
        }
    }
}

impl ServiceIdentity {
    /// Read `SERVICE_NAME`, `SERVICE_VERSION` and `SERVICE_GREETING`.
    ///
    /// `SERVICE_VERSION` set but empty hides the version; unset keeps the
    /// default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            name: resolve_with(&lookup, "SERVICE_NAME", &defaults.name),
            version: lookup("SERVICE_VERSION").unwrap_or(defaults.version),
            greeting: resolve_with(&lookup, "SERVICE_GREETING", &defaults.greeting),
        }
    }
}

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
    service: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
}

#[derive(Serialize)]
struct EchoBody {
    message: String,
    path: String,
}

/// Build the service router.
pub fn router(identity: ServiceIdentity) -> Router {
    Router::new()
        .route("/health", any(health))
        .fallback(echo)
        .with_state(identity)
}

async fn health(State(identity): State<ServiceIdentity>) -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        service: identity.name,
        version: Some(identity.version).filter(|v| !v.is_empty()),
    })
}

async fn echo(State(identity): State<ServiceIdentity>, uri: Uri) -> Json<EchoBody> {
    Json(EchoBody {
        message: identity.greeting,
        path: percent_decode_str(uri.path()).decode_utf8_lossy().into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::env::map_lookup;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 4096).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get(router(ServiceIdentity::default()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({"status": "ok", "service": "go-api-service", "version": "0.0.0"})
        );
    }

    #[tokio::test]
    async fn test_health_without_version() {
        let identity = ServiceIdentity {
            version: String::new(),
            ..ServiceIdentity::default()
        };
        let (_, body) = get(router(identity), "/health").await;
        assert_eq!(body, serde_json::json!({"status": "ok", "service": "go-api-service"}));
    }

    #[tokio::test]
    async fn test_catch_all_echoes_path() {
        let (status, body) = get(router(ServiceIdentity::default()), "/widgets/7?x=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({"message": "Hello from Go API Service", "path": "/widgets/7"})
        );

        let (_, body) = get(router(ServiceIdentity::default()), "/").await;
        assert_eq!(body["path"], "/");

        let (_, body) = get(router(ServiceIdentity::default()), "/a%20b").await;
        assert_eq!(body["path"], "/a b");

        let (_, body) = get(router(ServiceIdentity::default()), "/files%2Freport").await;
        assert_eq!(body["path"], "/files/report");
    }

    #[test]
    fn test_identity_from_lookup() {
        let identity = ServiceIdentity::from_lookup(map_lookup(&[
            ("SERVICE_NAME", "php-api-service"),
            ("SERVICE_VERSION", ""),
            ("SERVICE_GREETING", ""),
        ]));
        assert_eq!(identity.name, "php-api-service");
        assert_eq!(identity.version, "");
        assert_eq!(identity.greeting, "Hello from Go API Service");
    }
}
