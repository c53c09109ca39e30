/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use grievance_api::{app::AppState, config::Config};
/// use grievance_shared::db::pool::create_pool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(&config.database).await?;
/// let state = AppState::new(pool, config);
/// let app = grievance_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    routing::{get, post},
    Router,
};
use grievance_shared::classify::Classifier;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. Uses Arc
/// internally for cheap cloning; nothing in here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Sentiment classifier (lexicon loaded once at startup)
    pub classifier: Arc<Classifier>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: SqlitePool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
            classifier: Arc::new(Classifier::new()),
        }
    }

    /// Gets the session signing secret
    pub fn session_secret(&self) -> &str {
        &self.config.session.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Routes
///
/// ```text
/// /
/// ├── GET  /                       # Landing page (public)
/// ├── GET,POST /register           # Create an account (public)
/// ├── GET,POST /login              # Authenticate (public)
/// ├── GET  /logout                 # Clear the session
/// ├── GET,POST /submit             # Submit a complaint (public)
/// ├── GET  /dashboard              # Caller's complaints (session)
/// ├── GET,POST /admin/login        # Admin authentication (public)
/// ├── GET  /admin/panel            # All complaints + counters (admin)
/// └── POST /admin/complaint/:id    # Status update (admin)
/// ```
///
/// Session and role checks happen in the handlers via the `Principal`
/// extractors; the only router-wide middleware is request tracing.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    Router::new()
        .route("/", get(routes::pages::index))
        .route(
            "/register",
            get(routes::auth::register_page).post(routes::auth::register),
        )
        .route(
            "/login",
            get(routes::auth::login_page).post(routes::auth::login),
        )
        .route("/logout", get(routes::auth::logout))
        .route(
            "/submit",
            get(routes::complaints::submit_page).post(routes::complaints::submit),
        )
        .route("/dashboard", get(routes::complaints::dashboard))
        .route(
            "/admin/login",
            get(routes::admin::login_page).post(routes::admin::login),
        )
        .route("/admin/panel", get(routes::admin::panel))
        .route("/admin/complaint/:id", post(routes::admin::update_status))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
