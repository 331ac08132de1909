//! Password hashing using argon2
//!
//! New hashes are Argon2id PHC strings. Verification also accepts bcrypt
//! hashes (`$2a$`, `$2b$`, `$2y$`) for accounts imported from the previous
//! user store.

use ambridge_shared::AuthError;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::warn;

/// Argon2 instance for hashing. Tests use minimal parameters.
#[inline]
fn argon2_instance() -> Argon2<'static> {
    #[cfg(test)]
    {
        use argon2::{Algorithm, Params, Version};
        match Params::new(1024, 1, 1, None) {
            Ok(params) => Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            Err(_) => Argon2::default(),
        }
    }

    #[cfg(not(test))]
    {
        Argon2::default()
    }
}

fn is_bcrypt_hash(hash: &str) -> bool {
    hash.starts_with("$2a$") || hash.starts_with("$2b$") || hash.starts_with("$2y$")
}

/// Password hashing service
///
/// Argon2 is CPU-intensive; request handlers use the `_async` variants,
/// which run on the blocking thread pool.
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using argon2 (blocking operation)
    pub fn hash(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = argon2_instance()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::Hashing(e.to_string()))?;
        Ok(hash.to_string())
    }

    /// Hash a password asynchronously (non-blocking)
    pub async fn hash_async(password: String) -> Result<String, AuthError> {
        tokio::task::spawn_blocking(move || Self::hash(&password))
            .await
            .map_err(|e| AuthError::Hashing(format!("Task join error: {}", e)))?
    }

    /// Verify a password against a stored hash (blocking operation)
    ///
    /// Returns `false` for a mismatch and for a hash that cannot be parsed.
    pub fn verify(password: &str, hash: &str) -> bool {
        if is_bcrypt_hash(hash) {
            return match bcrypt::verify(password, hash) {
                Ok(matches) => matches,
                Err(e) => {
                    warn!(error = %e, "Stored bcrypt hash is malformed");
                    false
                }
            };
        }

        match PasswordHash::new(hash) {
            Ok(parsed) => argon2_instance()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                warn!(error = %e, "Stored password hash is malformed");
                false
            }
        }
    }

    /// Verify a password asynchronously (non-blocking)
    pub async fn verify_async(password: String, hash: String) -> Result<bool, AuthError> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash))
            .await
            .map_err(|e| AuthError::Hashing(format!("Task join error: {}", e)))
    }
}
