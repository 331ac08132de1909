//! Configuration management for the Ambridge backend
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: AMBRIDGE__)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgConnectOptions;
use std::env;

/// Secret used when nothing else is configured. Rejected in production.
pub const DEVELOPMENT_JWT_SECRET: &str = "development-secret-change-in-production";

/// Longest accepted access token lifetime (one year)
pub const MAX_ACCESS_TOKEN_EXPIRY_HOURS: i64 = 8760;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Connection options built from the individual fields, so passwords
    /// with URL-reserved characters need no escaping
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
    }
}

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_hours: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                host: "localhost".to_string(),
                port: 5432,
                user: "postgres".to_string(),
                password: "postgres".to_string(),
                name: "ambridge".to_string(),
                max_connections: 10,
            },
            jwt: JwtConfig {
                secret: DEVELOPMENT_JWT_SECRET.to_string(),
                access_token_expiry_hours: 24,
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with AMBRIDGE__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::with_name(&config_file).required(false))
            // e.g., AMBRIDGE__JWT__SECRET=... sets jwt.secret
            .add_source(config::Environment::with_prefix("AMBRIDGE").separator("__"))
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.jwt.secret.trim().is_empty() {
            anyhow::bail!("jwt.secret must not be empty");
        }
        if !(1..=MAX_ACCESS_TOKEN_EXPIRY_HOURS).contains(&self.jwt.access_token_expiry_hours) {
            anyhow::bail!(
                "jwt.access_token_expiry_hours must be between 1 and {}, got {}",
                MAX_ACCESS_TOKEN_EXPIRY_HOURS,
                self.jwt.access_token_expiry_hours
            );
        }
        Ok(())
    }

    /// Extra checks applied when RUST_ENV=production
    pub fn production_issues(&self) -> Vec<&'static str> {
        let mut issues = Vec::new();
        if self.jwt.secret == DEVELOPMENT_JWT_SECRET || self.jwt.secret.len() < 32 {
            issues.push("JWT secret must be at least 32 characters and not the development default");
        }
        if self.database.password == "postgres" {
            issues.push("Database password is still the development default");
        }
        issues
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.jwt.access_token_expiry_hours, 24);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_secret_rejected() {
        let mut config = AppConfig::default();
        config.jwt.secret = "   ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_lifetime_rejected() {
        let mut config = AppConfig::default();
        config.jwt.access_token_expiry_hours = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_lifetime_rejected() {
        let mut config = AppConfig::default();
        config.jwt.access_token_expiry_hours = MAX_ACCESS_TOKEN_EXPIRY_HOURS;
        assert!(config.validate().is_ok());

        config.jwt.access_token_expiry_hours = MAX_ACCESS_TOKEN_EXPIRY_HOURS + 1;
        assert!(config.validate().is_err());

        config.jwt.access_token_expiry_hours = 2_000_000_000_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_production_issues() {
        let mut config = AppConfig::default();
        assert_eq!(config.production_issues().len(), 2);

        config.jwt.secret = "x".repeat(48);
        config.database.password = "a-real-password".to_string();
        assert!(config.production_issues().is_empty());
    }

    #[test]
    fn test_is_production() {
        // Default should be false (development)
        assert!(!AppConfig::is_production());
    }
}
