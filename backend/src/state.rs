//! Application state management
//!
//! Shared state passed to all request handlers via Axum's state extraction.
//! Everything here is read-only after startup and cheap to clone.

use crate::auth::JwtService;
use crate::config::AppConfig;
use crate::repositories::{UserDirectory, UserRepository};
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Pre-initialized JWT service with cached keys
    pub jwt: JwtService,
    /// User account store
    pub users: Arc<dyn UserDirectory>,
}

impl AppState {
    /// Create the state used in production: users live in PostgreSQL
    pub fn new(db: PgPool, config: AppConfig) -> Self {
        let users = Arc::new(UserRepository::new(db.clone()));
        Self::with_directory(db, config, users)
    }

    /// Create state with a custom user directory
    pub fn with_directory(db: PgPool, config: AppConfig, users: Arc<dyn UserDirectory>) -> Self {
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry_hours);

        Self {
            db,
            config: Arc::new(config),
            jwt,
            users,
        }
    }

    /// Get a reference to the database pool
    #[inline]
    pub fn db(&self) -> &PgPool {
        &self.db
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the JWT service
    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    /// Get a reference to the user directory
    #[inline]
    pub fn users(&self) -> &dyn UserDirectory {
        self.users.as_ref()
    }
}
