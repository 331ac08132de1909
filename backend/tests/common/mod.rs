//! Common test utilities for integration tests
//!
//! Tests using this module need a PostgreSQL database. Connection settings
//! come from TEST_DATABASE_* variables, defaulting to a local
//! `ambridge_test` database.
#![allow(dead_code)]

use ambridge_backend::{
    config::{AppConfig, DatabaseConfig, JwtConfig, ServerConfig},
    routes,
    state::AppState,
};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "secret1";

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub pool: PgPool,
}

/// A registered, logged-in user
pub struct Session {
    pub user_id: i64,
    pub email: String,
    pub token: String,
    pub refresh_token: String,
}

impl TestApp {
    /// Create a new test application with a real database
    pub async fn new() -> Self {
        let config = test_config();
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(5)
            .connect_with(config.database.connect_options())
            .await
            .expect("Failed to create test database pool");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        let state = AppState::new(pool.clone(), config);
        let app = routes::create_router(state);

        Self { app, pool }
    }

    /// Send a request, optionally with a bearer token and JSON body
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, value)
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        self.request("GET", path, None, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.request("POST", path, None, Some(body)).await
    }

    /// Register a fresh user with a unique email and log in
    pub async fn sign_in_new_user(&self) -> Session {
        let email = unique_email("user");

        let (status, body) = self
            .post(
                "/api/auth/register",
                json!({
                    "name": "Test",
                    "surname": "User",
                    "email": email,
                    "password": TEST_PASSWORD
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        let user_id = body["user_id"].as_i64().unwrap();

        let (status, body) = self
            .post(
                "/api/auth/login",
                json!({ "email": email, "password": TEST_PASSWORD }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");

        Session {
            user_id,
            email,
            token: body["token"].as_str().unwrap().to_string(),
            refresh_token: body["refresh_token"].as_str().unwrap().to_string(),
        }
    }

    /// Change a stored role the way an operator would
    pub async fn set_role(&self, user_id: i64, role: &str) {
        sqlx::query("UPDATE users SET role = $2 WHERE id = $1")
            .bind(user_id)
            .bind(role)
            .execute(&self.pool)
            .await
            .expect("Failed to update role");
    }

    /// Clean up test data
    pub async fn cleanup(&self) {
        sqlx::query("TRUNCATE users, projects, crews RESTART IDENTITY CASCADE")
            .execute(&self.pool)
            .await
            .ok();
    }
}

pub fn unique_email(prefix: &str) -> String {
    format!("{}_{}@example.com", prefix, uuid::Uuid::new_v4().simple())
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            host: env_or("TEST_DATABASE_HOST", "localhost"),
            port: env_or("TEST_DATABASE_PORT", "5432").parse().unwrap_or(5432),
            user: env_or("TEST_DATABASE_USER", "postgres"),
            password: env_or("TEST_DATABASE_PASSWORD", "postgres"),
            name: env_or("TEST_DATABASE_NAME", "ambridge_test"),
            max_connections: 5,
        },
        jwt: JwtConfig {
            secret: "test-secret-key-for-testing-only-32chars".to_string(),
            access_token_expiry_hours: 1,
        },
    }
}
