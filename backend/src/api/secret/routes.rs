use super::handlers::{not_secret_data, secret_data};
use crate::auth::middleware::jwt_auth;
use axum::{Router, middleware, routing::get};

pub fn secret_router() -> Router {
    Router::new()
        .route("/secret", get(secret_data).layer(middleware::from_fn(jwt_auth)))
        .route("/not-secret", get(not_secret_data))
}
