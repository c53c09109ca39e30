/// Admin endpoints
///
/// # Endpoints
///
/// - `GET,POST /admin/login` - Public; POST authenticates admins only
/// - `GET /admin/panel` - All complaints plus counters (admin only)
/// - `POST /admin/complaint/:id` - Status update (admin only)

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use grievance_shared::auth::{password, session::SessionClaims};
use grievance_shared::models::{Complaint, ComplaintStatus, User};

use crate::{
    app::AppState,
    error::{AppError, AppResult},
    flash::{set_flash, take_flash},
    routes::auth::LoginForm,
    session::{create_login_cookie, Principal},
    views,
};

/// Status update form
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    /// New status; must name one of the recognized workflow states
    pub status: String,
}

/// Admin login page
pub async fn login_page(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = take_flash(jar);
    (jar, views::admin_login_page(flash.as_deref()))
}

/// Admin login handler
///
/// Same verification as the regular login, plus a role requirement: a
/// regular user with correct credentials still gets the generic failure,
/// so this endpoint does not reveal which accounts are admins.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<(CookieJar, Redirect)> {
    let user = User::find_by_email(&state.db, &form.email)
        .await?
        .ok_or(AppError::InvalidCredentials { admin: true })?;

    let valid = password::verify_password(&form.password, &user.password_hash)?;
    if !valid || !matches!(user.role, grievance_shared::models::Role::Admin) {
        return Err(AppError::InvalidCredentials { admin: true });
    }

    tracing::info!(user_id = user.id, "Admin logged in");

    let claims = SessionClaims::new(user.id, user.role);
    let jar = jar.add(create_login_cookie(&claims, state.session_secret())?);
    Ok((jar, Redirect::to("/admin/panel")))
}

/// Admin panel handler
///
/// Lists every complaint, newest first, with total/pending/resolved
/// counters. Non-admin principals are bounced before any data is read.
pub async fn panel(
    State(state): State<AppState>,
    principal: Principal,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    principal.require_admin()?;

    let complaints = Complaint::list_all(&state.db).await?;
    let counters = Complaint::counters(&state.db).await?;

    let (jar, flash) = take_flash(jar);
    Ok((
        jar,
        views::admin_panel_page(flash.as_deref(), &complaints, counters),
    ))
}

/// Status update handler
///
/// Overwrites the status unconditionally (last write wins, reapplication
/// is a no-op). Strings outside the recognized status set are rejected
/// without touching the row.
pub async fn update_status(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
    jar: CookieJar,
    Form(form): Form<StatusForm>,
) -> AppResult<(CookieJar, Redirect)> {
    principal.require_admin()?;

    let status: ComplaintStatus = form
        .status
        .parse()
        .map_err(|_| AppError::UnknownStatus(form.status.clone()))?;

    Complaint::update_status(&state.db, id, status)
        .await?
        .ok_or_else(|| AppError::NotFound("Complaint not found".to_string()))?;

    tracing::info!(complaint_id = id, status = status.as_str(), "Status updated");

    let jar = set_flash(jar, "Status updated");
    Ok((jar, Redirect::to("/admin/panel")))
}
