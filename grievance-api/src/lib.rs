//! # Grievance Portal API Server Library
//!
//! This library provides the core functionality for the grievance portal
//! server.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and redirect/flash mapping
//! - `flash`: Transient flash notices
//! - `routes`: Route handlers
//! - `session`: Principal extraction from the session cookie
//! - `views`: HTML page rendering

pub mod app;
pub mod config;
pub mod error;
pub mod flash;
pub mod routes;
pub mod session;
pub mod views;
