//! User-accounts backend.
//!
//! Registration, sign-in, JWT access/refresh tokens and a bearer-protected
//! user API, served by axum over a SQLite credential store.

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod repositories;
pub mod services;

use axum::{
    Extension, Router,
    http::{HeaderValue, Method, header},
};
use config::Config;
use services::token_service::TokenService;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Builds the application router with all routes and shared layers.
pub fn app(pool: SqlitePool, tokens: Arc<TokenService>, config: Config) -> Router {
    let cors = cors_layer(&config.cors_allowed_origins);

    Router::new()
        .nest(
            "/v1",
            auth::routes::auth_router().merge(api::user::routes::user_router()),
        )
        .merge(api::secret::routes::secret_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(Extension(pool))
                .layer(Extension(tokens))
                .layer(Extension(config)),
        )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
}
