//! # Grievance Portal Shared Library
//!
//! This crate contains the types and business logic shared between the
//! grievance portal API server and its tests.
//!
//! ## Module Organization
//!
//! - `models`: Database models and repository operations
//! - `classify`: Text classification (sentiment + priority)
//! - `auth`: Password hashing and session tokens
//! - `db`: Connection pool, migrations, and admin bootstrap

pub mod auth;
pub mod classify;
pub mod db;
pub mod models;

/// Current version of the grievance shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
