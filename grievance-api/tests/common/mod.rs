/// Common test utilities for integration tests
///
/// Shared infrastructure for driving the router end to end:
/// - In-memory database with migrations applied
/// - Form POST / GET helpers (via tower's `oneshot`)
/// - Session cookie and flash notice extraction

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use tower::ServiceExt;

use grievance_api::app::{build_router, AppState};
use grievance_api::config::{Config, ServerConfig, SessionConfig};
use grievance_shared::auth::password::hash_password;
use grievance_shared::db::migrations::run_migrations;
use grievance_shared::db::pool::{create_test_pool, DatabaseConfig};
use grievance_shared::models::{CreateUser, Role, User};
use sqlx::SqlitePool;

/// Test context containing the router and direct database access
pub struct TestContext {
    pub db: SqlitePool,
    pub app: Router,
}

impl TestContext {
    /// Creates a new test context with a fresh in-memory database
    pub async fn new() -> Self {
        let db = create_test_pool().await.expect("Pool should be created");
        run_migrations(&db).await.expect("Migrations should apply");

        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig::default(),
            session: SessionConfig {
                secret: "integration-test-secret-at-least-32-bytes".to_string(),
            },
            admin_bootstrap: None,
        };

        let app = build_router(AppState::new(db.clone(), config));

        Self { db, app }
    }

    /// Sends a GET request, optionally with a session cookie
    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        self.app
            .clone()
            .oneshot(builder.body(Body::empty()).expect("Request should build"))
            .await
            .expect("Request should not fail")
    }

    /// Sends a form-encoded POST request, optionally with a session cookie
    pub async fn post_form(&self, path: &str, body: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        self.app
            .clone()
            .oneshot(
                builder
                    .body(Body::from(body.to_string()))
                    .expect("Request should build"),
            )
            .await
            .expect("Request should not fail")
    }

    /// Registers a user through the HTTP surface
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Response {
        let body = format!("name={}&email={}&password={}", name, urlencode(email), password);
        self.post_form("/register", &body, None).await
    }

    /// Logs in through the HTTP surface, returning the session cookie
    pub async fn login(&self, email: &str, password: &str) -> String {
        let body = format!("email={}&password={}", urlencode(email), password);
        let response = self.post_form("/login", &body, None).await;
        session_cookie(&response).expect("Login should set the session cookie")
    }

    /// Creates an admin account directly in the database
    pub async fn create_admin(&self, email: &str, password: &str) -> User {
        let password_hash = hash_password(password).expect("Hash should succeed");
        User::create(
            &self.db,
            CreateUser {
                name: "Administrator".to_string(),
                email: email.to_string(),
                password_hash,
                role: Role::Admin,
            },
        )
        .await
        .expect("Admin creation should succeed")
    }

    /// Logs in as admin through the admin login page
    pub async fn admin_login(&self, email: &str, password: &str) -> String {
        let body = format!("email={}&password={}", urlencode(email), password);
        let response = self.post_form("/admin/login", &body, None).await;
        session_cookie(&response).expect("Admin login should set the session cookie")
    }
}

/// Minimal encoder for the characters our test emails contain
fn urlencode(value: &str) -> String {
    value.replace('@', "%40").replace('+', "%2B")
}

/// Extracts the session cookie (name=value) from a response, if set
pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("grievance_session="))
        .and_then(|value| value.split(';').next())
        .filter(|pair| *pair != "grievance_session=")
        .map(|pair| pair.to_string())
}

/// Decodes the flash notice set on a response, if any
pub fn flash_message(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("grievance_flash="))
        .and_then(|value| value.split(';').next())
        .and_then(|pair| pair.strip_prefix("grievance_flash="))
        .filter(|encoded| !encoded.is_empty())
        .and_then(|encoded| URL_SAFE_NO_PAD.decode(encoded).ok())
        .and_then(|bytes| String::from_utf8(bytes).ok())
}

/// Returns the Location header of a redirect response
pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("Response should carry a Location header")
}
