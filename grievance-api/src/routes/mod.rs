/// Route handlers
///
/// This module contains all route handlers organized by concern:
///
/// - `pages`: Landing page
/// - `auth`: Registration, login, logout
/// - `complaints`: Submission and the user dashboard
/// - `admin`: Admin login, panel, and status triage

pub mod admin;
pub mod auth;
pub mod complaints;
pub mod pages;
