//! Session gate port - the single authorization decision for mutations.

/// Claims carried by a session token.
#[derive(Debug, Clone)]
pub struct SessionClaims {
    pub subject: String,
    pub exp: i64,
}

/// Session gate trait.
///
/// There is no user table: the only identity is the fixed administrator
/// configured at startup. A token's validity is a pure function of its
/// value and embedded expiry - no server-side session state exists, so
/// logout is a client-side concern and needs no method here.
pub trait SessionGate: Send + Sync {
    /// Compare credentials against the fixed identity pair and, on match,
    /// issue a session token. Either fully succeeds or fully fails.
    fn login(&self, username: &str, password: &str) -> Result<String, AuthError>;

    /// Validate a presented token. Pure read, no side effects.
    fn validate(&self, token: &str) -> Result<SessionClaims, AuthError>;

    /// Fixed token lifetime in seconds, measured from issuance.
    fn expiration_seconds(&self) -> i64;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,
}
