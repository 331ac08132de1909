//! Opaque refresh tokens

use ambridge_shared::AuthError;
use argon2::password_hash::rand_core::{OsRng, RngCore};

const REFRESH_TOKEN_BYTES: usize = 32;

/// Generate a refresh token: 32 bytes from the OS RNG, hex encoded
pub fn issue_refresh_token() -> Result<String, AuthError> {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| AuthError::Entropy(e.to_string()))?;
    Ok(hex::encode(bytes))
}
