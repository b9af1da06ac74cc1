//! Router configuration for the tempmail HTTP API.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{create_inbox, delete_inbox, get_email, list_inbox, AppState};
use super::middleware::{client_ip, create_cors_layer, security_headers};
use super::openapi::ApiDoc;
use crate::config::ServerConfig;
use crate::Result;

/// Create the main API router.
///
/// Fails if a configured trusted proxy is not an IP address.
pub fn create_router(app_state: Arc<AppState>, config: &ServerConfig) -> Result<Router> {
    let trusted = Arc::new(config.trusted_proxy_addrs()?);

    let api_routes = Router::new()
        .route("/inbox/:address", get(list_inbox))
        .route("/email/:message_id", get(get_email))
        .route("/email", post(create_inbox).delete(delete_inbox))
        .with_state(app_state);

    Ok(Router::new()
        .merge(api_routes)
        .merge(create_health_router())
        .merge(create_swagger_router())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(move |req, next| {
                    client_ip(trusted.clone(), req, next)
                }))
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(&config.cors_origins))
                .layer(middleware::from_fn(security_headers)),
        ))
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Create the OpenAPI document and Swagger UI router.
pub fn create_swagger_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use http_body_util::BodyExt;
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn test_health_router() {
        let response = create_health_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn test_openapi_json_served() {
        let response = create_swagger_router()
            .oneshot(
                Request::builder()
                    .uri("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["paths"].get("/email").is_some());
    }

    #[cfg(feature = "sqlite")]
    #[tokio::test]
    async fn test_create_router_rejects_bad_proxy() {
        let db = crate::db::Database::open_in_memory().await.unwrap();
        let state = Arc::new(AppState::with_domains(
            db,
            crate::inbox::DomainAllowList::new(["mail.test"]),
        ));
        let config = ServerConfig {
            trusted_proxies: vec!["not-an-ip".to_string()],
            ..ServerConfig::default()
        };

        assert!(create_router(state, &config).is_err());
    }
}
