//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the database URL, server port, token lifetimes and the CORS allow-list.

use anyhow::{Context, Result, ensure};
use std::env;

/// Origins allowed by CORS when `CORS_ALLOWED_ORIGINS` is not set.
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost",
    "http://localhost:8000",
    "http://localhost:3000",
    "http://localhost:3001",
    "http://localhost:4000",
    "http://localhost:19006",
];

/// Upper bound for either token lifetime (one year).
pub const MAX_TOKEN_TTL_SECONDS: u64 = 365 * 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub jwt_secret: String,
    pub access_token_expires_in_seconds: u64,
    pub refresh_token_expires_in_seconds: u64,
    pub bcrypt_cost: u32,
    pub server_port: u16,
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL not set")?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = env::var("DB_ACQUIRE_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "3".to_string())
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET not set")?;
        ensure!(!jwt_secret.is_empty(), "JWT_SECRET must not be empty");

        let access_token_expires_in_seconds = env::var("ACCESS_TOKEN_EXPIRES_IN_SECONDS")
            .unwrap_or_else(|_| "1800".to_string())
            .parse::<u64>()
            .context("ACCESS_TOKEN_EXPIRES_IN_SECONDS must be a valid number")?;

        let refresh_token_expires_in_seconds = env::var("REFRESH_TOKEN_EXPIRES_IN_SECONDS")
            .unwrap_or_else(|_| "36000".to_string())
            .parse::<u64>()
            .context("REFRESH_TOKEN_EXPIRES_IN_SECONDS must be a valid number")?;

        let bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(value) => value
                .parse::<u32>()
                .context("BCRYPT_COST must be a valid number")?,
            Err(_) => bcrypt::DEFAULT_COST,
        };

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        let cors_allowed_origins = match env::var("CORS_ALLOWED_ORIGINS") {
            Ok(value) => parse_origins(&value),
            Err(_) => DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };

        let config = Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            jwt_secret,
            access_token_expires_in_seconds,
            refresh_token_expires_in_seconds,
            bcrypt_cost,
            server_port,
            cors_allowed_origins,
        };
        config.validate()?;

        Ok(config)
    }

    /// Checks the invariants `from_env` relies on.
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.jwt_secret.is_empty(), "JWT_SECRET must not be empty");
        for (name, seconds) in [
            (
                "ACCESS_TOKEN_EXPIRES_IN_SECONDS",
                self.access_token_expires_in_seconds,
            ),
            (
                "REFRESH_TOKEN_EXPIRES_IN_SECONDS",
                self.refresh_token_expires_in_seconds,
            ),
        ] {
            ensure!(
                (1..=MAX_TOKEN_TTL_SECONDS).contains(&seconds),
                "{} must be between 1 and {}",
                name,
                MAX_TOKEN_TTL_SECONDS
            );
        }
        ensure!(
            (4..=31).contains(&self.bcrypt_cost),
            "BCRYPT_COST must be between 4 and 31"
        );
        Ok(())
    }
}

/// Splits a comma-separated origin list, dropping blanks.
pub fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
