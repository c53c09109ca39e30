/// Configuration management for the portal server
///
/// Configuration is loaded once from environment variables at startup into
/// an immutable struct, which is then shared via `AppState`. Nothing
/// mutates it afterwards.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: SQLite connection string (default: sqlite://grievance.db)
/// - `HOST`: Host to bind to (default: 0.0.0.0)
/// - `PORT`: Port to bind to (default: 8080)
/// - `SESSION_SECRET`: Secret key for session tokens (required, >= 32 bytes)
/// - `ADMIN_EMAIL` / `ADMIN_PASSWORD`: Optional pair; when both are set and
///   no admin account exists, one is provisioned at startup
/// - `RUST_LOG`: Log level (default: info)
///
/// # Example
///
/// ```no_run
/// use grievance_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use grievance_shared::db::pool::DatabaseConfig;
use std::env;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Session configuration
    pub session: SessionConfig,

    /// Optional admin bootstrap credentials
    pub admin_bootstrap: Option<AdminBootstrap>,
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Secret key for signing session tokens
    ///
    /// Must be at least 32 bytes. Generate with: `openssl rand -hex 32`
    pub secret: String,
}

/// Credentials for the explicit first-run admin provisioning step
#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    /// Admin email address
    pub email: String,

    /// Admin password (hashed before storage)
    pub password: String,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `SESSION_SECRET` is missing or too short, if
    /// `PORT` is not a number, or if exactly one of `ADMIN_EMAIL` /
    /// `ADMIN_PASSWORD` is set.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://grievance.db".to_string());

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()?;

        let session_secret = env::var("SESSION_SECRET")
            .map_err(|_| anyhow::anyhow!("SESSION_SECRET environment variable is required"))?;

        if session_secret.len() < 32 {
            anyhow::bail!("SESSION_SECRET must be at least 32 characters long");
        }

        let admin_bootstrap = match (env::var("ADMIN_EMAIL"), env::var("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) => Some(AdminBootstrap { email, password }),
            (Err(_), Err(_)) => None,
            _ => anyhow::bail!("ADMIN_EMAIL and ADMIN_PASSWORD must be set together"),
        };

        Ok(Self {
            server: ServerConfig { host, port },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
                ..Default::default()
            },
            session: SessionConfig {
                secret: session_secret,
            },
            admin_bootstrap,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig::default(),
            session: SessionConfig {
                secret: "test-secret-key-at-least-32-bytes-long".to_string(),
            },
            admin_bootstrap: None,
        };

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }
}
