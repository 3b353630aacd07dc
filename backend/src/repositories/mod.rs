//! Persistence layer.
//!
//! Repositories wrap the SQLite pool and expose typed queries; they return
//! `anyhow::Result` and leave business rules to the services.

pub mod user_repository;
