//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle sign-up, sign-in and token refresh. They are public:
//! the refresh endpoint validates its own refresh token.

use crate::auth::handlers::*;
use axum::{
    Router,
    routing::{get, post},
};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/refresh-token", get(refresh_token))
}
