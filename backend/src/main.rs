//! Main entry point for the user-accounts backend.
//!
//! This file initializes logging, loads configuration, prepares the database
//! and serves the axum application.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::init;
use user_accounts::{app, config::Config, database::Database, services::token_service::TokenService};

#[tokio::main]
async fn main() -> Result<()> {
    init();

    let config = Config::from_env()?;
    let db = Database::new(&config).await?;
    db.migrate().await?;

    let tokens = Arc::new(TokenService::from_config(&config)?);
    info!(
        "Access tokens expire after {}s, refresh tokens after {}s",
        tokens.access_expires_in(),
        tokens.refresh_expires_in()
    );

    let app = app(db.pool().clone(), tokens, config.clone());

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    info!("Starting user-accounts server on port {}", config.server_port);
    axum::serve(listener, app).await?;

    db.close().await;
    Ok(())
}
