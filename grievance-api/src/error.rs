/// Error handling for the portal server
///
/// This module provides a unified error type for the handler layer. Every
/// recoverable error kind maps to a redirect plus a transient flash notice
/// (the portal's interaction model is form POST → redirect → notice);
/// internal failures are logged and surfaced as a plain 500. No error is
/// fatal to the process.
///
/// # Example
///
/// ```no_run
/// use grievance_api::error::{AppError, AppResult};
/// use axum::response::Redirect;
///
/// async fn handler() -> AppResult<Redirect> {
///     Err(AppError::Unauthorized)
/// }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::fmt;

use crate::flash::flash_cookie;

/// Handler result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Unified handler error type
#[derive(Debug)]
pub enum AppError {
    /// Registration attempted with an email that already exists
    DuplicateEmail,

    /// Login failed; `admin` selects which login page to bounce back to
    InvalidCredentials {
        /// Whether the failure came from the admin login flow
        admin: bool,
    },

    /// A session-requiring page was hit without a valid session
    NotAuthenticated,

    /// An admin-only page was hit by a non-admin principal
    Unauthorized,

    /// Unknown complaint ID
    NotFound(String),

    /// Status update carried a string outside the recognized status set
    UnknownStatus(String),

    /// Form validation failed (registration)
    Validation(String),

    /// Internal server error (500)
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DuplicateEmail => write!(f, "Email already registered"),
            AppError::InvalidCredentials { admin: false } => write!(f, "Invalid credentials"),
            AppError::InvalidCredentials { admin: true } => write!(f, "Invalid admin credentials"),
            AppError::NotAuthenticated => write!(f, "Not authenticated"),
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::UnknownStatus(status) => write!(f, "Unrecognized status: {}", status),
            AppError::Validation(msg) => write!(f, "Validation failed: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (target, notice) = match self {
            AppError::DuplicateEmail => ("/register", "Email already registered.".to_string()),
            AppError::InvalidCredentials { admin: false } => {
                ("/login", "Invalid credentials".to_string())
            }
            AppError::InvalidCredentials { admin: true } => {
                ("/admin/login", "Invalid admin credentials".to_string())
            }
            AppError::NotAuthenticated => ("/login", "Please log in to continue.".to_string()),
            AppError::Unauthorized => ("/", "Unauthorized".to_string()),
            AppError::NotFound(msg) => ("/admin/panel", msg),
            AppError::UnknownStatus(status) => (
                "/admin/panel",
                format!("Unrecognized status: {}", status),
            ),
            AppError::Validation(msg) => ("/register", msg),
            AppError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred",
                )
                    .into_response();
            }
        };

        let jar = CookieJar::default().add(flash_cookie(&notice));
        (jar, Redirect::to(target)).into_response()
    }
}

/// Convert sqlx errors to handler errors
///
/// The only unique constraint in the schema is on `users.email`, so a
/// unique violation always means a duplicate registration.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::DuplicateEmail
            }
            other => AppError::InternalError(format!("Database error: {}", other)),
        }
    }
}

impl From<grievance_shared::auth::password::PasswordError> for AppError {
    fn from(err: grievance_shared::auth::password::PasswordError) -> Self {
        AppError::InternalError(format!("Password operation failed: {}", err))
    }
}

/// An invalid or expired session token means the caller has to log in again
impl From<grievance_shared::auth::session::SessionError> for AppError {
    fn from(_: grievance_shared::auth::session::SessionError) -> Self {
        AppError::NotAuthenticated
    }
}
