/// Complaint submission and the user dashboard
///
/// # Endpoints
///
/// - `GET,POST /submit` - Public; POST creates a complaint and reports the
///   reference ID back via a flash notice
/// - `GET /dashboard` - Requires a session; lists the caller's complaints

use axum::{
    extract::State,
    response::{Html, Redirect},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use grievance_shared::classify::detect_priority;
use grievance_shared::models::{Complaint, CreateComplaint};

use crate::{
    app::AppState,
    error::AppResult,
    flash::{set_flash, take_flash},
    session::{OptionalPrincipal, Principal},
    views,
};

/// Departments offered on the submission form
pub const DEPARTMENTS: [&str; 7] = [
    "Academics",
    "Hostel",
    "Mess",
    "Library",
    "IT Support",
    "Facilities",
    "Administration",
];

/// Categories offered on the submission form
pub const CATEGORIES: [&str; 7] = [
    "Infrastructure",
    "Faculty",
    "Mess Food",
    "Ragging",
    "Harassment",
    "WiFi",
    "Other",
];

/// Submission form; every field is optional and silently defaulted
#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    /// Submitter name (defaults to "Anonymous")
    pub name: Option<String>,

    /// Submitter email (defaults to empty)
    pub email: Option<String>,

    /// Anonymous checkbox ("on" when checked)
    pub anonymous: Option<String>,

    /// Submission type tag (defaults to "complaint")
    pub kind: Option<String>,

    /// Category (defaults to "General")
    pub category: Option<String>,

    /// Department (defaults to "General")
    pub department: Option<String>,

    /// Free-text description; drives classification
    pub description: Option<String>,
}

/// Treats a missing or empty form field as absent
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Submission page
pub async fn submit_page(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = take_flash(jar);
    (jar, views::submit_page(flash.as_deref(), &DEPARTMENTS, &CATEGORIES))
}

/// Submission handler
///
/// Works for anonymous visitors and logged-in users alike. When the caller
/// is logged in, the complaint is linked to their account so it appears on
/// their dashboard; the anonymous checkbox independently scrubs the
/// name/email fields and cannot be bypassed by also supplying them.
pub async fn submit(
    State(state): State<AppState>,
    OptionalPrincipal(principal): OptionalPrincipal,
    jar: CookieJar,
    Form(form): Form<SubmitForm>,
) -> AppResult<(CookieJar, Redirect)> {
    let mut name = non_empty(form.name).unwrap_or_else(|| "Anonymous".to_string());
    let mut email = non_empty(form.email).unwrap_or_default();
    let anonymous = matches!(form.anonymous.as_deref(), Some("on") | Some("true"));
    let kind = non_empty(form.kind).unwrap_or_else(|| "complaint".to_string());
    let category = non_empty(form.category).unwrap_or_else(|| "General".to_string());
    let department = non_empty(form.department).unwrap_or_else(|| "General".to_string());
    let description = non_empty(form.description).unwrap_or_default();

    // Anonymity cannot be bypassed by also supplying identifying fields
    if anonymous {
        name = "Anonymous".to_string();
        email = String::new();
    }

    let sentiment = state.classifier.sentiment(&description);
    let priority = detect_priority(&description);

    let complaint = Complaint::create(
        &state.db,
        CreateComplaint {
            user_id: principal.map(|p| p.user_id),
            name,
            email,
            anonymous,
            category,
            department,
            kind,
            description,
            sentiment,
            priority,
        },
    )
    .await?;

    tracing::info!(
        complaint_id = complaint.id,
        sentiment = complaint.sentiment.as_str(),
        priority = complaint.priority.as_str(),
        "Complaint submitted"
    );

    let jar = set_flash(
        jar,
        &format!("Submitted successfully. Reference ID: {}", complaint.id),
    );
    Ok((jar, Redirect::to("/submit")))
}

/// User dashboard handler
///
/// Read-only listing of the caller's own complaints, newest first.
pub async fn dashboard(
    State(state): State<AppState>,
    principal: Principal,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let complaints = Complaint::list_by_owner(&state.db, principal.user_id).await?;

    let (jar, flash) = take_flash(jar);
    Ok((jar, views::dashboard_page(flash.as_deref(), &complaints)))
}
