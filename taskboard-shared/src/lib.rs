//! # Taskboard Shared Library
//!
//! This crate contains the data models, permission rules, and database layer
//! shared by the Taskboard API server and its tooling.
//!
//! ## Module Organization
//!
//! - `models`: Database models (users, projects, stories, tasks) and their
//!   CRUD operations, plus the task status lifecycle rules
//! - `auth`: Role-based permission gate and the per-request actor context
//! - `db`: Connection pool and migration runner
//! - `seed`: Demo dataset seeding
//! - `error`: Domain error taxonomy

pub mod auth;
pub mod db;
pub mod error;
pub mod models;
pub mod seed;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
