pub mod config;
pub mod error;
pub mod extract;
pub mod locale;
pub mod modules;
pub mod repositories;
pub mod services;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use config::AuthSettings;
use modules::{
    auth::auth_routes, catalog::catalog_routes, contacts::contact_routes,
    requests::request_routes, reviews::review_routes,
};
use repositories::Repositories;
use services::jwt::JwtService;
use services::mailer::EmailSender;
use services::rate_limit::IpRateLimiter;
use services::security::security_headers;

pub struct AppState {
    pub repos: Repositories,
    pub jwt_service: JwtService,
    pub mailer: Arc<dyn EmailSender>,
    pub settings: AuthSettings,
}

pub fn create_app(state: AppState, auth_limiter: IpRateLimiter, cors_origin: Option<&str>) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/auth", auth_routes(auth_limiter))
        .merge(catalog_routes())
        .merge(request_routes())
        .merge(contact_routes())
        .merge(review_routes())
        .layer(middleware::from_fn(security_headers))
        .layer(RequestBodyLimitLayer::new(1024 * 100)) // 100KB max body
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origin))
        .with_state(state)
}

/// A configured origin gets credentialed CORS so the session cookie flows;
/// without one the API stays permissive for local work.
fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let Some(origin) = origin else {
        return CorsLayer::permissive();
    };

    match HeaderValue::from_str(origin) {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_credentials(true)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        Err(_) => {
            tracing::warn!(origin = %origin, "CORS_ORIGIN is not a valid header value, cross-origin requests disabled");
            CorsLayer::new()
        }
    }
}

async fn root() -> &'static str {
    "Import-Export Portal API"
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
