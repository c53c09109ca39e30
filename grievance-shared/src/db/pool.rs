/// Database connection pool management
///
/// This module provides the SQLite connection pool backing the portal.
/// The store is a single local file (created on first run); all access
/// from every handler goes through this pool.
///
/// # Example
///
/// ```no_run
/// use grievance_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), sqlx::Error> {
/// let config = DatabaseConfig {
///     url: "sqlite://grievance.db".to_string(),
///     ..Default::default()
/// };
///
/// let pool = create_pool(&config).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// Configuration for the database connection pool
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite connection URL (e.g. "sqlite://grievance.db")
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Timeout for acquiring a connection from the pool (seconds)
    pub connect_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://grievance.db".to_string(),
            max_connections: 5,
            connect_timeout_seconds: 30,
        }
    }
}

/// Creates and initializes the SQLite connection pool
///
/// The database file is created if it does not exist, and foreign key
/// enforcement is switched on for every connection. A health check runs
/// before the pool is handed back.
///
/// # Errors
///
/// Returns an error if the URL is invalid, the file cannot be opened, or
/// the health check fails.
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    info!(
        url = %config.url,
        max_connections = config.max_connections,
        "Creating database connection pool"
    );

    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .connect_with(options)
        .await?;

    health_check(&pool).await?;

    info!("Database connection pool created successfully");
    Ok(pool)
}

/// Creates an in-memory pool for tests
///
/// Each in-memory SQLite database is private to a single connection, so
/// the pool is capped at one connection.
///
/// # Errors
///
/// Returns an error if the pool cannot be created
pub async fn create_test_pool() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
}

/// Performs a health check on the database connection
///
/// # Errors
///
/// Returns an error if the health check query fails
pub async fn health_check(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    debug!("Performing database health check");

    let result: (i32,) = sqlx::query_as("SELECT 1").fetch_one(pool).await?;

    if result.0 == 1 {
        debug!("Database health check passed");
        Ok(())
    } else {
        Err(sqlx::Error::Protocol(
            "Health check returned unexpected value".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();
        assert_eq!(config.url, "sqlite://grievance.db");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.connect_timeout_seconds, 30);
    }

    #[tokio::test]
    async fn test_in_memory_pool_is_healthy() {
        let pool = create_test_pool().await.expect("Pool should be created");
        health_check(&pool).await.expect("Health check should pass");
    }
}
