/// Complaint model and database operations
///
/// A complaint is a single submitted report. Its sentiment and priority
/// labels are computed once at submission time and never recomputed; the
/// only mutation the portal performs afterwards is an admin overwriting
/// the status.
///
/// # Status workflow
///
/// ```text
/// Submitted → In Progress → Resolved
/// ```
///
/// Transitions are admin-driven overwrites with no enforced ordering
/// (`Resolved` may be set back to `Submitted`). `Resolved` is treated as
/// "done" for counting purposes only; no terminal state is enforced.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE complaints (
///     id          INTEGER PRIMARY KEY AUTOINCREMENT,
///     user_id     INTEGER REFERENCES users(id),
///     name        TEXT NOT NULL,
///     email       TEXT NOT NULL,
///     anonymous   INTEGER NOT NULL DEFAULT 0,
///     category    TEXT NOT NULL,
///     department  TEXT NOT NULL,
///     kind        TEXT NOT NULL,
///     description TEXT NOT NULL,
///     sentiment   TEXT NOT NULL,
///     priority    TEXT NOT NULL DEFAULT 'Normal',
///     status      TEXT NOT NULL DEFAULT 'Submitted',
///     created_at  TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Sentiment label derived from the complaint description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum Sentiment {
    /// Compound score >= 0.05
    Positive,

    /// Compound score <= -0.05
    Negative,

    /// Everything in between
    Neutral,
}

impl Sentiment {
    /// Converts sentiment to string for display and storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

/// Priority label derived from the complaint description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum Priority {
    /// No priority keyword matched
    Normal,

    /// At least one priority keyword matched
    High,
}

impl Priority {
    /// Converts priority to string for display and storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Normal => "Normal",
            Priority::High => "High",
        }
    }
}

/// Complaint workflow status
///
/// Closed enumeration; status updates coming in from the admin panel are
/// parsed with [`ComplaintStatus::from_str`] and rejected when they do not
/// name a recognized state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum ComplaintStatus {
    /// Initial state of every complaint
    Submitted,

    /// An admin has picked the complaint up
    #[sqlx(rename = "In Progress")]
    #[serde(rename = "In Progress")]
    InProgress,

    /// Treated as "done" for the admin panel counters
    Resolved,
}

impl ComplaintStatus {
    /// Converts status to string for display and storage
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Submitted => "Submitted",
            ComplaintStatus::InProgress => "In Progress",
            ComplaintStatus::Resolved => "Resolved",
        }
    }
}

/// Error returned when a status string does not name a recognized state
#[derive(Debug, Clone, thiserror::Error)]
#[error("unrecognized complaint status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for ComplaintStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Submitted" => Ok(ComplaintStatus::Submitted),
            "In Progress" => Ok(ComplaintStatus::InProgress),
            "Resolved" => Ok(ComplaintStatus::Resolved),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Complaint model representing a submitted report
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Complaint {
    /// Unique complaint ID, also the reference ID reported to the submitter
    pub id: i64,

    /// Owning user (None for anonymous or unauthenticated submissions)
    pub user_id: Option<i64>,

    /// Submitter display name (`Anonymous` when the anonymous flag is set)
    pub name: String,

    /// Submitter email (empty when the anonymous flag is set)
    pub email: String,

    /// Whether the submitter asked to stay anonymous
    pub anonymous: bool,

    /// Complaint category (e.g. `Infrastructure`, `WiFi`)
    pub category: String,

    /// Department the complaint is addressed to
    pub department: String,

    /// Submission type tag (e.g. `complaint`, `suggestion`)
    pub kind: String,

    /// Free-text description; drives classification at creation time
    pub description: String,

    /// Sentiment label, set exactly once at creation
    pub sentiment: Sentiment,

    /// Priority label, set exactly once at creation
    pub priority: Priority,

    /// Current workflow status
    pub status: ComplaintStatus,

    /// When the complaint was submitted
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new complaint
///
/// Status is not part of the input; every complaint starts as `Submitted`.
#[derive(Debug, Clone)]
pub struct CreateComplaint {
    /// Owning user, if the submitter was logged in
    pub user_id: Option<i64>,

    /// Submitter display name
    pub name: String,

    /// Submitter email
    pub email: String,

    /// Anonymous flag
    pub anonymous: bool,

    /// Category
    pub category: String,

    /// Department
    pub department: String,

    /// Submission type tag
    pub kind: String,

    /// Free-text description
    pub description: String,

    /// Derived sentiment label
    pub sentiment: Sentiment,

    /// Derived priority label
    pub priority: Priority,
}

/// Derived counters shown on the admin panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplaintCounters {
    /// Total number of complaints
    pub total: i64,

    /// Complaints with status != Resolved
    pub pending: i64,

    /// Complaints with status == Resolved
    pub resolved: i64,
}

impl Complaint {
    /// Creates a new complaint with status `Submitted`
    ///
    /// The returned row carries the generated primary key, which doubles as
    /// the reference ID reported back to the submitter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails
    pub async fn create(pool: &SqlitePool, data: CreateComplaint) -> Result<Self, sqlx::Error> {
        let complaint = sqlx::query_as::<_, Complaint>(
            r#"
            INSERT INTO complaints
                (user_id, name, email, anonymous, category, department, kind,
                 description, sentiment, priority, status)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            RETURNING id, user_id, name, email, anonymous, category, department,
                      kind, description, sentiment, priority, status, created_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.name)
        .bind(data.email)
        .bind(data.anonymous)
        .bind(data.category)
        .bind(data.department)
        .bind(data.kind)
        .bind(data.description)
        .bind(data.sentiment)
        .bind(data.priority)
        .bind(ComplaintStatus::Submitted)
        .fetch_one(pool)
        .await?;

        Ok(complaint)
    }

    /// Finds a complaint by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database read fails
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let complaint = sqlx::query_as::<_, Complaint>(
            r#"
            SELECT id, user_id, name, email, anonymous, category, department,
                   kind, description, sentiment, priority, status, created_at
            FROM complaints
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(complaint)
    }

    /// Lists complaints owned by a user, newest first
    ///
    /// Anonymous or unauthenticated submissions (user_id NULL) never appear
    /// in any user's listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database read fails
    pub async fn list_by_owner(pool: &SqlitePool, user_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let complaints = sqlx::query_as::<_, Complaint>(
            r#"
            SELECT id, user_id, name, email, anonymous, category, department,
                   kind, description, sentiment, priority, status, created_at
            FROM complaints
            WHERE user_id = ?1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(complaints)
    }

    /// Lists all complaints, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database read fails
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        let complaints = sqlx::query_as::<_, Complaint>(
            r#"
            SELECT id, user_id, name, email, anonymous, category, department,
                   kind, description, sentiment, priority, status, created_at
            FROM complaints
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(complaints)
    }

    /// Overwrites the status of a complaint
    ///
    /// Last write wins; reapplying the same status is a no-op on observable
    /// state. Returns `None` when the ID does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails
    pub async fn update_status(
        pool: &SqlitePool,
        id: i64,
        status: ComplaintStatus,
    ) -> Result<Option<Self>, sqlx::Error> {
        let complaint = sqlx::query_as::<_, Complaint>(
            r#"
            UPDATE complaints
            SET status = ?2
            WHERE id = ?1
            RETURNING id, user_id, name, email, anonymous, category, department,
                      kind, description, sentiment, priority, status, created_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(pool)
        .await?;

        Ok(complaint)
    }

    /// Computes the admin panel counters in a single query
    ///
    /// # Errors
    ///
    /// Returns an error if the database read fails
    pub async fn counters(pool: &SqlitePool) -> Result<ComplaintCounters, sqlx::Error> {
        let (total, resolved): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COALESCE(SUM(CASE WHEN status = 'Resolved' THEN 1 ELSE 0 END), 0)
            FROM complaints
            "#,
        )
        .fetch_one(pool)
        .await?;

        Ok(ComplaintCounters {
            total,
            pending: total - resolved,
            resolved,
        })
    }
}
