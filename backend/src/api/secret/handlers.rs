use crate::auth::models::AuthenticatedUser;
use axum::{extract::Extension, response::Json};

pub const SECRET_MESSAGE: &str = "Top Secret data only authorized users can access this info";
pub const NOT_SECRET_MESSAGE: &str = "Not secret data";

/// Only reachable with a valid access token.
pub async fn secret_data(Extension(caller): Extension<AuthenticatedUser>) -> Json<&'static str> {
    tracing::debug!("Secret data requested by {}", caller.email);
    Json(SECRET_MESSAGE)
}

pub async fn not_secret_data() -> Json<&'static str> {
    Json(NOT_SECRET_MESSAGE)
}
