//! Authentication routes
//!
//! Registration, login, token refresh and logout, plus the signed-in
//! user's profile and the admin check.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::extract::ValidatedJson;
use crate::services::AuthService;
use crate::state::AppState;
use ambridge_shared::{
    CheckAdminRequest, CheckAdminResponse, LoginRequest, LoginResponse, MessageResponse,
    RefreshTokenRequest, RegisterRequest, RegisterResponse, TokenPair, UpdateProfileRequest,
    UserProfile,
};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh-token", post(refresh_token))
        .route("/logout", post(logout))
        .route("/profile", get(get_profile).patch(update_profile))
        .route("/check-admin", post(check_admin))
}

/// POST /api/auth/register
async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let response = AuthService::register(state.users(), req).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/auth/login
async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let response = AuthService::login(state.users(), state.jwt(), &req.email, &req.password).await?;
    Ok(Json(response))
}

/// POST /api/auth/refresh-token
async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RefreshTokenRequest>,
) -> ApiResult<Json<TokenPair>> {
    let tokens = AuthService::refresh(state.users(), state.jwt(), &req.refresh_token).await?;
    Ok(Json(tokens))
}

/// POST /api/auth/logout
async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> ApiResult<Json<MessageResponse>> {
    AuthService::logout(state.users(), auth_user.user_id).await?;
    Ok(Json(MessageResponse::new("Logged out successfully")))
}

/// GET /api/auth/profile
async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> ApiResult<Json<UserProfile>> {
    let profile = AuthService::get_profile(state.users(), auth_user.user_id).await?;
    Ok(Json(profile))
}

/// PATCH /api/auth/profile
async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<UserProfile>> {
    let profile = AuthService::update_profile(state.users(), auth_user.user_id, req).await?;
    Ok(Json(profile))
}

/// POST /api/auth/check-admin
async fn check_admin(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(req): ValidatedJson<CheckAdminRequest>,
) -> ApiResult<Json<CheckAdminResponse>> {
    let response = AuthService::is_admin(state.users(), auth_user.user_id, &req.username).await?;
    Ok(Json(response))
}
