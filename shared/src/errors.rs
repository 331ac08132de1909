//! Error types for the authentication core

use thiserror::Error;

/// Authentication error types
///
/// The first four variants are caller mistakes and all surface as 401 with a
/// generic message. The last three are infrastructure failures and surface as
/// internal errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Missing token")]
    MissingToken,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Randomness source unavailable: {0}")]
    Entropy(String),
}

impl AuthError {
    /// Whether the error was caused by the caller rather than the server
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials
                | AuthError::TokenExpired
                | AuthError::InvalidToken
                | AuthError::MissingToken
        )
    }
}
