//! JWT token generation and validation
//!
//! Access tokens are HS256-signed and carry the user id and role. Keys are
//! derived once at startup and shared through `AppState`.

use ambridge_shared::{AuthError, Role};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    pub role: Role,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Identity recovered from a verified access token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenIdentity {
    pub user_id: i64,
    pub role: Role,
}

/// Pre-computed JWT keys
#[derive(Clone)]
struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }
}

/// JWT service for token operations
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    validation: Arc<Validation>,
    access_token_expiry_hours: i64,
}

impl JwtService {
    /// Create a new JWT service with pre-computed keys
    ///
    /// Call once at startup and store in `AppState`.
    pub fn new(secret: &str, access_token_expiry_hours: i64) -> Self {
        // Only the HMAC family is accepted; `none` and asymmetric
        // algorithms fail header checks before the signature is looked at.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            keys: JwtKeys::new(secret),
            validation: Arc::new(validation),
            access_token_expiry_hours,
        }
    }

    /// Issue an access token valid for the configured lifetime
    #[inline]
    pub fn issue_access_token(&self, user_id: i64, role: Role) -> Result<String, AuthError> {
        self.issue_access_token_at(user_id, role, Utc::now())
    }

    pub(crate) fn issue_access_token_at(
        &self,
        user_id: i64,
        role: Role,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let expires_at = Duration::try_hours(self.access_token_expiry_hours)
            .and_then(|ttl| issued_at.checked_add_signed(ttl))
            .ok_or_else(|| {
                AuthError::Signing(format!(
                    "token lifetime of {} hours is out of range",
                    self.access_token_expiry_hours
                ))
            })?;

        let claims = Claims {
            sub: user_id.to_string(),
            role,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Validate a token and return its claims
    pub fn decode_claims(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.keys.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })
    }

    /// Verify an access token and recover the identity it carries
    pub fn verify_access_token(&self, token: &str) -> Result<TokenIdentity, AuthError> {
        let claims = self.decode_claims(token)?;
        let user_id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(TokenIdentity {
            user_id,
            role: claims.role,
        })
    }
}
