//! Authentication module
//!
//! JWT access tokens, opaque refresh tokens, argon2 password hashing and
//! the request extractors built on them.

mod jwt;
mod middleware;
mod password;
mod refresh;

pub use jwt::{Claims, JwtService, TokenIdentity};
pub use middleware::{AdminUser, AuthUser};
pub use password::PasswordService;
pub use refresh::issue_refresh_token;
