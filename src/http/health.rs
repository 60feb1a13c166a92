//! Liveness response served by the gateway itself.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::config::{HealthConfig, HealthFormat};

#[derive(Serialize)]
struct HealthBody<'a> {
    status: &'static str,
    service: &'a str,
}

/// Always `200 OK`; the body shape follows the configured format.
pub fn respond(config: &HealthConfig) -> Response {
    match config.format {
        HealthFormat::Json => Json(HealthBody {
            status: "ok",
            service: &config.service,
        })
        .into_response(),
        HealthFormat::Plain => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            "OK\n",
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_json_body() {
        let response = respond(&HealthConfig::default());
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert_eq!(body_string(response).await, r#"{"status":"ok","service":"go-gateway"}"#);
    }

    #[tokio::test]
    async fn test_plain_body() {
        let config = HealthConfig {
            format: HealthFormat::Plain,
            ..HealthConfig::default()
        };
        let response = respond(&config);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "OK\n");
    }
}
