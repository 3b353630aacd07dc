//! Defines the HTTP routes for user listing and management.

use super::handlers::{list_users, update_user};
use crate::auth::middleware::jwt_auth;
use axum::{
    Router, middleware,
    routing::{get, post},
};

pub fn user_router() -> Router {
    Router::new()
        .route("/users", get(list_users).layer(middleware::from_fn(jwt_auth)))
        .route(
            "/user/update",
            post(update_user).layer(middleware::from_fn(jwt_auth)),
        )
}
