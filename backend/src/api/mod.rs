//! Central module for organizing the application's API endpoints.
//!
//! Authentication routes live in `crate::auth`; this module holds user
//! management, the fixed-response check endpoints and shared error helpers.

pub mod common;
pub mod secret;
pub mod user;
