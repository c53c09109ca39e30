/// HTML page rendering
///
/// The portal's pages are deliberately plain: a shared layout, forms that
/// POST back to the same path, and tables for the two dashboards. All
/// user-supplied text is escaped before interpolation.

use axum::response::Html;
use grievance_shared::models::{Complaint, ComplaintCounters, ComplaintStatus};

/// Escapes text for interpolation into HTML
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Shared page shell: nav, optional flash notice, body
fn layout(title: &str, flash: Option<&str>, body: &str) -> Html<String> {
    let notice = flash
        .map(|msg| format!(r#"<p class="notice">{}</p>"#, escape(msg)))
        .unwrap_or_default();

    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{title} - Grievance Portal</title></head>
<body>
<nav>
  <a href="/">Home</a>
  <a href="/submit">Submit</a>
  <a href="/dashboard">My Complaints</a>
  <a href="/login">Login</a>
  <a href="/register">Register</a>
  <a href="/logout">Logout</a>
</nav>
{notice}
<h1>{title}</h1>
{body}
</body>
</html>"#,
        title = escape(title),
        notice = notice,
        body = body,
    ))
}

pub fn index_page(flash: Option<&str>) -> Html<String> {
    layout(
        "Grievance Portal",
        flash,
        r#"<p>Submit complaints to the institution, anonymously if you prefer,
and track their resolution.</p>
<p><a href="/submit">Submit a complaint</a></p>"#,
    )
}

pub fn register_page(flash: Option<&str>) -> Html<String> {
    layout(
        "Register",
        flash,
        r#"<form method="post" action="/register">
  <label>Name <input name="name" required></label>
  <label>Email <input name="email" type="email" required></label>
  <label>Password <input name="password" type="password" required></label>
  <button type="submit">Register</button>
</form>"#,
    )
}

pub fn login_page(flash: Option<&str>) -> Html<String> {
    layout(
        "Login",
        flash,
        r#"<form method="post" action="/login">
  <label>Email <input name="email" type="email" required></label>
  <label>Password <input name="password" type="password" required></label>
  <button type="submit">Login</button>
</form>"#,
    )
}

pub fn admin_login_page(flash: Option<&str>) -> Html<String> {
    layout(
        "Admin Login",
        flash,
        r#"<form method="post" action="/admin/login">
  <label>Email <input name="email" type="email" required></label>
  <label>Password <input name="password" type="password" required></label>
  <button type="submit">Login</button>
</form>"#,
    )
}

pub fn submit_page(flash: Option<&str>, departments: &[&str], categories: &[&str]) -> Html<String> {
    let department_options: String = departments
        .iter()
        .map(|d| format!(r#"<option value="{0}">{0}</option>"#, escape(d)))
        .collect();
    let category_options: String = categories
        .iter()
        .map(|c| format!(r#"<option value="{0}">{0}</option>"#, escape(c)))
        .collect();

    let body = format!(
        r#"<form method="post" action="/submit">
  <label>Name <input name="name"></label>
  <label>Email <input name="email" type="email"></label>
  <label>Submit anonymously <input name="anonymous" type="checkbox"></label>
  <label>Type
    <select name="kind">
      <option value="complaint">Complaint</option>
      <option value="suggestion">Suggestion</option>
      <option value="feedback">Feedback</option>
    </select>
  </label>
  <label>Category <select name="category">{category_options}</select></label>
  <label>Department <select name="department">{department_options}</select></label>
  <label>Description <textarea name="description" required></textarea></label>
  <button type="submit">Submit</button>
</form>"#,
    );

    layout("Submit a Complaint", flash, &body)
}

fn complaint_row(complaint: &Complaint) -> String {
    format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
        complaint.id,
        escape(&complaint.kind),
        escape(&complaint.category),
        escape(&complaint.department),
        escape(&complaint.description),
        complaint.sentiment.as_str(),
        complaint.priority.as_str(),
        complaint.status.as_str(),
    )
}

const COMPLAINT_TABLE_HEADER: &str = "<tr><th>Ref</th><th>Type</th><th>Category</th>\
<th>Department</th><th>Description</th><th>Sentiment</th><th>Priority</th><th>Status</th></tr>";

pub fn dashboard_page(flash: Option<&str>, complaints: &[Complaint]) -> Html<String> {
    let rows: String = complaints.iter().map(complaint_row).collect();
    let body = format!("<table>{}{}</table>", COMPLAINT_TABLE_HEADER, rows);
    layout("My Complaints", flash, &body)
}

/// Row on the admin panel: complaint fields plus the status-update form
fn admin_row(complaint: &Complaint) -> String {
    let options: String = [
        ComplaintStatus::Submitted,
        ComplaintStatus::InProgress,
        ComplaintStatus::Resolved,
    ]
    .iter()
    .map(|status| {
        let selected = if *status == complaint.status {
            " selected"
        } else {
            ""
        };
        format!(
            r#"<option value="{0}"{1}>{0}</option>"#,
            status.as_str(),
            selected
        )
    })
    .collect();

    format!(
        r#"<tr><td>{id}</td><td>{name}</td><td>{kind}</td><td>{category}</td><td>{department}</td>
<td>{description}</td><td>{sentiment}</td><td>{priority}</td>
<td><form method="post" action="/admin/complaint/{id}">
<select name="status">{options}</select>
<button type="submit">Update</button>
</form></td></tr>"#,
        id = complaint.id,
        name = escape(&complaint.name),
        kind = escape(&complaint.kind),
        category = escape(&complaint.category),
        department = escape(&complaint.department),
        description = escape(&complaint.description),
        sentiment = complaint.sentiment.as_str(),
        priority = complaint.priority.as_str(),
        options = options,
    )
}

pub fn admin_panel_page(
    flash: Option<&str>,
    complaints: &[Complaint],
    counters: ComplaintCounters,
) -> Html<String> {
    let rows: String = complaints.iter().map(admin_row).collect();
    let body = format!(
        r#"<p>Total: {total} | Pending: {pending} | Resolved: {resolved}</p>
<table><tr><th>Ref</th><th>Name</th><th>Type</th><th>Category</th><th>Department</th>
<th>Description</th><th>Sentiment</th><th>Priority</th><th>Status</th></tr>{rows}</table>"#,
        total = counters.total,
        pending = counters.pending,
        resolved = counters.resolved,
        rows = rows,
    );
    layout("Admin Panel", flash, &body)
}
