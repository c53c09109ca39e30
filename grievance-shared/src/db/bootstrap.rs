/// First-run admin provisioning
///
/// The admin panel is unreachable until at least one admin-role account
/// exists. Rather than hard-coding a well-known email/password pair into
/// the binary, provisioning is explicit: the operator supplies the admin
/// credentials through configuration, and the bootstrap step creates the
/// account only when no admin exists yet.

use tracing::{info, warn};

use crate::auth::password::{hash_password, PasswordError};
use crate::models::{CreateUser, Role, User};
use sqlx::SqlitePool;

/// Error type for the bootstrap step
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// Database read or write failed
    #[error("Database error during bootstrap: {0}")]
    Database(#[from] sqlx::Error),

    /// Hashing the configured password failed
    #[error(transparent)]
    Password(#[from] PasswordError),
}

/// Creates the initial admin account if none exists
///
/// Returns `true` if an account was created, `false` if an admin already
/// existed and the call was a no-op.
///
/// # Errors
///
/// Returns an error if the existence check, the password hash, or the
/// insert fails.
pub async fn bootstrap_admin(
    pool: &SqlitePool,
    email: &str,
    password: &str,
) -> Result<bool, BootstrapError> {
    if User::admin_exists(pool).await? {
        info!("Admin account already exists, skipping bootstrap");
        return Ok(false);
    }

    let password_hash = hash_password(password)?;

    let admin = User::create(
        pool,
        CreateUser {
            name: "Administrator".to_string(),
            email: email.to_string(),
            password_hash,
            role: Role::Admin,
        },
    )
    .await?;

    warn!(
        user_id = admin.id,
        email = %admin.email,
        "Bootstrapped initial admin account"
    );
    Ok(true)
}
