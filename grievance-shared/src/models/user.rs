/// User model and database operations
///
/// This module provides the User model and the repository operations the
/// authentication flows need. Accounts are created on registration (role
/// `user`) or by the admin bootstrap step (role `admin`); nothing in the
/// portal updates or deletes a user afterwards.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id            INTEGER PRIMARY KEY AUTOINCREMENT,
///     name          TEXT NOT NULL,
///     email         TEXT NOT NULL UNIQUE COLLATE NOCASE,
///     password_hash TEXT NOT NULL,
///     role          TEXT NOT NULL DEFAULT 'user',
///     created_at    TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use grievance_shared::models::user::{CreateUser, Role, User};
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), sqlx::Error> {
/// let user = User::create(
///     &pool,
///     CreateUser {
///         name: "Jo Bloggs".to_string(),
///         email: "jo@example.com".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///         role: Role::User,
///     },
/// )
/// .await?;
/// println!("Created user {}", user.id);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Account role
///
/// Modeled as a closed enumeration rather than a free string so that
/// invalid roles are unrepresentable. Stored as TEXT (`user` / `admin`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular account: may log in, submit, and view their own complaints
    User,

    /// Administrator: may additionally triage all complaints
    Admin,
}

impl Role {
    /// Converts role to string for display and storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

/// User model representing a registered account
///
/// Passwords are stored as Argon2id hashes, never in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (autoincrement primary key)
    pub id: i64,

    /// Display name
    pub name: String,

    /// Email address (unique, compared case-insensitively)
    pub email: String,

    /// Argon2id password hash (PHC string format)
    pub password_hash: String,

    /// Account role
    pub role: Role,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Argon2id password hash (NOT the plaintext password)
    pub password_hash: String,

    /// Account role
    pub role: Role,
}

impl User {
    /// Creates a new user
    ///
    /// # Errors
    ///
    /// Returns an error if the email already exists (unique constraint
    /// violation, surfaced to callers as a duplicate-email failure) or if
    /// the database write fails.
    pub async fn create(pool: &SqlitePool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, role)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, name, email, password_hash, role, created_at
            "#,
        )
        .bind(data.name)
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.role)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database read fails
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, created_at
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by email address (case-insensitive)
    ///
    /// # Errors
    ///
    /// Returns an error if the database read fails
    pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, created_at
            FROM users
            WHERE email = ?1 COLLATE NOCASE
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Checks whether any admin-role account exists
    ///
    /// Used by the first-run bootstrap step to decide whether provisioning
    /// is needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database read fails
    pub async fn admin_exists(pool: &SqlitePool) -> Result<bool, sqlx::Error> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE role = 'admin')")
                .fetch_one(pool)
                .await?;

        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_as_str() {
        assert_eq!(Role::User.as_str(), "user");
        assert_eq!(Role::Admin.as_str(), "admin");
    }

    #[test]
    fn test_create_user_struct() {
        let create_user = CreateUser {
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password_hash: "hash".to_string(),
            role: Role::User,
        };

        assert_eq!(create_user.email, "test@example.com");
        assert_eq!(create_user.role, Role::User);
    }

    // Integration tests for database operations are in tests/repository_tests.rs
}
