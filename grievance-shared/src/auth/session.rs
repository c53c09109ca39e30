/// Session token generation and validation
///
/// Sessions are cookie-backed: on login the server signs an HS256 token
/// identifying the principal (user ID and role) and sets it as the session
/// cookie; every request that needs a principal validates the cookie's
/// token. Logout removes the cookie.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC with SHA-256)
/// - **Expiration**: 24 hours
/// - **Validation**: Signature, expiration, and issuer checks
/// - **Secret Management**: The secret must be at least 32 bytes
///
/// # Example
///
/// ```
/// use grievance_shared::auth::session::{create_session_token, validate_session_token, SessionClaims};
/// use grievance_shared::models::Role;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "a-secret-key-at-least-32-bytes-long!";
/// let claims = SessionClaims::new(42, Role::User);
/// let token = create_session_token(&claims, secret)?;
///
/// let validated = validate_session_token(&token, secret)?;
/// assert_eq!(validated.sub, 42);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::Role;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "grievance_session";

/// Issuer written into every session token
const ISSUER: &str = "grievance-portal";

/// Session lifetime
const SESSION_HOURS: i64 = 24;

/// Error type for session token operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Failed to create token
    #[error("Failed to create session token: {0}")]
    CreateError(String),

    /// Token failed validation (bad signature, wrong issuer, malformed)
    #[error("Invalid session token: {0}")]
    Invalid(String),

    /// Token has expired
    #[error("Session token has expired")]
    Expired,
}

/// Claims carried by a session token
///
/// `sub` is the user ID; `role` is embedded so that admin checks do not
/// need a database round trip on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject - user ID
    pub sub: i64,

    /// Account role at login time
    pub role: Role,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,
}

impl SessionClaims {
    /// Creates claims for a freshly authenticated principal
    pub fn new(user_id: i64, role: Role) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(SESSION_HOURS);

        Self {
            sub: user_id,
            role,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
        }
    }

    /// Creates claims with an explicit expiration, for tests
    pub fn with_expiration(user_id: i64, role: Role, expires_at: chrono::DateTime<Utc>) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id,
            role,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            nbf: now.timestamp(),
        }
    }
}

/// Signs a session token
///
/// # Errors
///
/// Returns `SessionError::CreateError` if encoding fails
pub fn create_session_token(claims: &SessionClaims, secret: &str) -> Result<String, SessionError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| SessionError::CreateError(e.to_string()))
}

/// Validates a session token and returns its claims
///
/// Checks signature, expiration, not-before, and issuer.
///
/// # Errors
///
/// Returns `SessionError::Expired` for expired tokens and
/// `SessionError::Invalid` for everything else that fails validation.
pub fn validate_session_token(token: &str, secret: &str) -> Result<SessionClaims, SessionError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_nbf = true;

    match decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    ) {
        Ok(data) => Ok(data.claims),
        Err(e) => match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => Err(SessionError::Expired),
            _ => Err(SessionError::Invalid(e.to_string())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_session_round_trip() {
        let claims = SessionClaims::new(7, Role::User);
        let token = create_session_token(&claims, SECRET).expect("Token should sign");

        let validated = validate_session_token(&token, SECRET).expect("Token should validate");
        assert_eq!(validated.sub, 7);
        assert_eq!(validated.role, Role::User);
        assert_eq!(validated.iss, "grievance-portal");
    }

    #[test]
    fn test_admin_role_survives_round_trip() {
        let claims = SessionClaims::new(1, Role::Admin);
        let token = create_session_token(&claims, SECRET).expect("Token should sign");

        let validated = validate_session_token(&token, SECRET).expect("Token should validate");
        assert_eq!(validated.role, Role::Admin);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let claims = SessionClaims::new(7, Role::User);
        let token = create_session_token(&claims, SECRET).expect("Token should sign");

        let result = validate_session_token(&token, "another-secret-also-32-bytes-long!!");
        assert!(matches!(result, Err(SessionError::Invalid(_))));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let expired = Utc::now() - Duration::hours(2);
        let claims = SessionClaims::with_expiration(7, Role::User, expired);
        let token = create_session_token(&claims, SECRET).expect("Token should sign");

        let result = validate_session_token(&token, SECRET);
        assert!(matches!(result, Err(SessionError::Expired)));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let result = validate_session_token("not-a-token", SECRET);
        assert!(matches!(result, Err(SessionError::Invalid(_))));
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let claims = SessionClaims::new(7, Role::User);
        let token = create_session_token(&claims, SECRET).expect("Token should sign");

        // Flip a character in the payload segment
        let mut tampered: Vec<char> = token.chars().collect();
        let mid = tampered.len() / 2;
        tampered[mid] = if tampered[mid] == 'a' { 'b' } else { 'a' };
        let tampered: String = tampered.into_iter().collect();

        assert!(validate_session_token(&tampered, SECRET).is_err());
    }
}
