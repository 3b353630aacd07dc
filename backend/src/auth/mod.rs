//! Authentication: sign-up, sign-in, token refresh and the bearer-token guard.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
