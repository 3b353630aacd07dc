//! Fixed-response endpoints for checking that authorization works.

pub mod handlers;
pub mod routes;
