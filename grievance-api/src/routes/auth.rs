/// Authentication endpoints
///
/// This module provides the regular-user authentication flows:
/// - Registration
/// - Login (establishes the session cookie)
/// - Logout (clears it)
///
/// # Endpoints
///
/// - `GET,POST /register`
/// - `GET,POST /login`
/// - `GET /logout`

use axum::{
    extract::State,
    response::{Html, Redirect},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use validator::Validate;

use grievance_shared::auth::{password, session::SessionClaims};
use grievance_shared::models::{CreateUser, Role, User};

use crate::{
    app::AppState,
    error::{AppError, AppResult},
    flash::{set_flash, take_flash},
    session::{create_login_cookie, session_removal_cookie},
    views,
};

/// Registration form
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    /// Display name
    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub name: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login form (shared with the admin login flow)
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Email address
    pub email: String,

    /// Password
    pub password: String,
}

/// Registration page
pub async fn register_page(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = take_flash(jar);
    (jar, views::register_page(flash.as_deref()))
}

/// Registration handler
///
/// Creates a `user`-role account. Fails with `DuplicateEmail` when the
/// address is already registered; on success redirects to the login page.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> AppResult<(CookieJar, Redirect)> {
    form.validate().map_err(|e| {
        let message = e
            .field_errors()
            .values()
            .flat_map(|errors| errors.iter())
            .filter_map(|error| error.message.as_ref())
            .map(|m| m.to_string())
            .next()
            .unwrap_or_else(|| "Validation failed".to_string());
        AppError::Validation(message)
    })?;

    if User::find_by_email(&state.db, &form.email).await?.is_some() {
        return Err(AppError::DuplicateEmail);
    }

    let password_hash = password::hash_password(&form.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            name: form.name,
            email: form.email,
            password_hash,
            role: Role::User,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "Registered new user");

    let jar = set_flash(jar, "Registration successful. Please login.");
    Ok((jar, Redirect::to("/login")))
}

/// Login page
pub async fn login_page(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = take_flash(jar);
    (jar, views::login_page(flash.as_deref()))
}

/// Login handler
///
/// Any role may log in here. The failure response is identical for an
/// unknown email and a wrong password.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<(CookieJar, Redirect)> {
    let user = User::find_by_email(&state.db, &form.email)
        .await?
        .ok_or(AppError::InvalidCredentials { admin: false })?;

    let valid = password::verify_password(&form.password, &user.password_hash)?;
    if !valid {
        return Err(AppError::InvalidCredentials { admin: false });
    }

    tracing::info!(user_id = user.id, "User logged in");

    let claims = SessionClaims::new(user.id, user.role);
    let jar = jar.add(create_login_cookie(&claims, state.session_secret())?);
    Ok((jar, Redirect::to("/")))
}

/// Logout handler
///
/// Removes the session cookie unconditionally, so an expired or garbage
/// cookie is cleared too rather than lingering until its client-side
/// expiry.
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = jar.remove(session_removal_cookie());
    (jar, Redirect::to("/"))
}
