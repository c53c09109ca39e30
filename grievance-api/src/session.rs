/// Session extraction for handlers
///
/// The session is cookie-backed: the cookie value is a signed token
/// identifying the principal (see `grievance_shared::auth::session`).
/// Handlers do not reach into cookies themselves; they declare what they
/// need through one of two extractors:
///
/// - [`Principal`]: the handler requires a logged-in caller. Requests with
///   no cookie, or with an invalid or expired token, are redirected to the
///   login page.
/// - [`OptionalPrincipal`]: the handler works either way (the submit flow
///   attaches the caller's user ID when present).
///
/// # Example
///
/// ```no_run
/// use grievance_api::session::Principal;
///
/// async fn dashboard(principal: Principal) -> String {
///     format!("Hello, user {}!", principal.user_id)
/// }
/// ```

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use grievance_shared::auth::session::{
    create_session_token, validate_session_token, SessionClaims, SESSION_COOKIE,
};
use grievance_shared::models::Role;
use std::convert::Infallible;

use crate::{app::AppState, error::AppError};

/// The authenticated identity associated with the current session
#[derive(Debug, Clone, Copy)]
pub struct Principal {
    /// User ID of the caller
    pub user_id: i64,

    /// Role embedded in the session token at login time
    pub role: Role,
}

impl Principal {
    /// Whether this principal may use the admin surfaces
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Fails with `Unauthorized` unless the principal is an admin
    ///
    /// Admin-only handlers call this before touching any data.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Unauthorized)
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Principal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let cookie = jar.get(SESSION_COOKIE).ok_or(AppError::NotAuthenticated)?;

        let claims = validate_session_token(cookie.value(), state.session_secret())?;

        Ok(Principal {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}

/// A principal that may or may not be present
///
/// Never rejects; an invalid or missing session simply yields `None`.
#[derive(Debug, Clone, Copy)]
pub struct OptionalPrincipal(pub Option<Principal>);

#[async_trait]
impl FromRequestParts<AppState> for OptionalPrincipal {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(OptionalPrincipal(
            Principal::from_request_parts(parts, state).await.ok(),
        ))
    }
}

/// Signs a session token for the given claims and wraps it in the cookie
/// set on login
pub fn create_login_cookie(
    claims: &SessionClaims,
    secret: &str,
) -> Result<Cookie<'static>, AppError> {
    let token = create_session_token(claims, secret)
        .map_err(|e| AppError::InternalError(format!("Failed to sign session token: {}", e)))?;

    Ok(Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build())
}

/// Builds the removal cookie used by logout
pub fn session_removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}
