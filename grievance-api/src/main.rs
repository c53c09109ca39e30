//! # Grievance Portal Server
//!
//! HTTP server for the institutional grievance portal: registration,
//! login, complaint submission with automatic sentiment/priority
//! classification, a personal dashboard, and an admin triage panel.
//!
//! ## Usage
//!
//! ```bash
//! SESSION_SECRET=$(openssl rand -hex 32) cargo run -p grievance-api
//! ```

use grievance_api::{
    app::{build_router, AppState},
    config::Config,
};
use grievance_shared::db::{bootstrap::bootstrap_admin, migrations::run_migrations, pool::create_pool};
use grievance_shared::models::User;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grievance_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Grievance portal v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let pool = create_pool(&config.database).await?;
    run_migrations(&pool).await?;

    // Explicit admin provisioning; without it the admin panel stays
    // unreachable until an admin account is created some other way.
    match &config.admin_bootstrap {
        Some(bootstrap) => {
            bootstrap_admin(&pool, &bootstrap.email, &bootstrap.password).await?;
        }
        None => {
            if !User::admin_exists(&pool).await? {
                tracing::warn!(
                    "No admin account exists and ADMIN_EMAIL/ADMIN_PASSWORD are not set"
                );
            }
        }
    }

    let bind_address = config.bind_address();
    let state = AppState::new(pool, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received, exiting...");
        })
        .await?;

    Ok(())
}
