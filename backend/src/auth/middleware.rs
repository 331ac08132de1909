//! Authentication extractors
//!
//! `AuthUser` trusts the signed claims. `AdminUser` additionally re-reads the
//! caller's role from the user directory, so a demotion takes effect before
//! the caller's token expires.

use crate::error::ApiError;
use crate::state::AppState;
use ambridge_shared::{AuthError, Role};
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, Method},
};
use tracing::warn;

/// Authenticated user extracted from the bearer token
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: i64,
    pub role: Role,
}

fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidToken)?
        .trim();

    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token)
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let token = bearer_token(parts)?;
        let identity = app_state.jwt().verify_access_token(token)?;

        Ok(AuthUser {
            user_id: identity.user_id,
            role: identity.role,
        })
    }
}

/// Authenticated user whose stored role is currently `admin`
#[derive(Debug, Clone, Copy)]
pub struct AdminUser {
    pub user_id: i64,
}

fn denied_action(method: &Method) -> &'static str {
    if method == Method::POST {
        "create"
    } else if method == Method::PUT || method == Method::PATCH {
        "update"
    } else if method == Method::DELETE {
        "delete"
    } else {
        "manage"
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        let app_state = AppState::from_ref(state);

        // A caller whose record is gone is treated as a non-admin
        let is_admin = app_state
            .users()
            .find_by_id(auth.user_id)
            .await?
            .is_some_and(|user| user.role().is_admin());

        if !is_admin {
            warn!(user_id = auth.user_id, method = %parts.method, "Admin gate denied request");
            return Err(ApiError::Forbidden(format!(
                "Only admins can {} crew members",
                denied_action(&parts.method)
            )));
        }

        Ok(AdminUser {
            user_id: auth.user_id,
        })
    }
}
