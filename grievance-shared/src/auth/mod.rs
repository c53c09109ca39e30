/// Authentication primitives
///
/// - `password`: Argon2id password hashing and verification
/// - `session`: Signed session tokens carried in the session cookie

pub mod password;
pub mod session;
