/// Database migration runner
///
/// Migrations live in the `migrations/` directory at the workspace root and
/// are embedded into the binary at compile time via `sqlx::migrate!`. They
/// run once at startup, before the server starts accepting requests.
///
/// # Example
///
/// ```no_run
/// use grievance_shared::db::migrations::run_migrations;
/// use grievance_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(&DatabaseConfig::default()).await?;
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::SqlitePool;
use tracing::info;

/// Runs all pending database migrations
///
/// # Errors
///
/// Returns an error if a migration fails to apply or if the migrations
/// table cannot be created.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running database migrations");
    sqlx::migrate!("../migrations").run(pool).await?;
    info!("Database migrations complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::create_test_pool;

    #[tokio::test]
    async fn test_migrations_apply_cleanly() {
        let pool = create_test_pool().await.expect("Pool should be created");
        run_migrations(&pool).await.expect("Migrations should apply");

        // Both tables exist afterwards
        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .expect("Query should succeed");

        let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();
        assert!(names.contains(&"users"));
        assert!(names.contains(&"complaints"));
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let pool = create_test_pool().await.expect("Pool should be created");
        run_migrations(&pool).await.expect("First run should apply");
        run_migrations(&pool).await.expect("Second run should be a no-op");
    }
}
