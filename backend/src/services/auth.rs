//! Authentication service: accounts, sessions and profiles
//!
//! Password hashing and verification run on the blocking thread pool. The
//! service only talks to the user store through `UserDirectory`, so it runs
//! unchanged against PostgreSQL or the in-memory store used in tests.

use crate::auth::{issue_refresh_token, JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::{NewUser, ProfileChanges, UserDirectory, UserRecord};
use ambridge_shared::validation::{normalize_email, validate_email, validate_password, validate_required};
use ambridge_shared::{
    AuthError, CheckAdminResponse, LoginResponse, PublicUser, RegisterRequest, RegisterResponse,
    Role, TokenPair, UpdateProfileRequest, UserProfile,
};
use tracing::{info, warn};

/// Avatar assigned when registration does not supply one
pub const DEFAULT_AVATAR: &str = "/default-avatar.png";

impl From<&UserRecord> for PublicUser {
    fn from(user: &UserRecord) -> Self {
        PublicUser {
            id: user.id,
            name: user.name.clone(),
            surname: user.surname.clone(),
            email: user.email.clone(),
            role: user.role(),
            profile_image: user.profile_image.clone(),
            referral: user.referral_source.clone(),
            company: user.company_name.clone(),
            current_position: user.position.clone(),
        }
    }
}

impl From<&UserRecord> for UserProfile {
    fn from(user: &UserRecord) -> Self {
        UserProfile {
            id: user.id,
            name: user.name.clone(),
            surname: user.surname.clone(),
            email: user.email.clone(),
            role: user.role(),
            profile_image: user.profile_image.clone(),
            company_name: user.company_name.clone(),
            company_email: user.company_email.clone(),
            company_address: user.company_address.clone(),
            company_phone: user.company_phone.clone(),
            position: user.position.clone(),
            referral_source: user.referral_source.clone(),
            resume_file: user.resume_file.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Register a new account. No token is issued.
    pub async fn register(
        users: &dyn UserDirectory,
        req: RegisterRequest,
    ) -> Result<RegisterResponse, ApiError> {
        validate_required("Name", &req.name).map_err(|m| ApiError::invalid_field("name", m))?;
        validate_required("Surname", &req.surname)
            .map_err(|m| ApiError::invalid_field("surname", m))?;
        validate_password(&req.password).map_err(|m| ApiError::invalid_field("password", m))?;

        let email = normalize_email(&req.email);
        validate_email(&email).map_err(|m| ApiError::invalid_field("email", m))?;

        if users.find_by_email(&email).await?.is_some() {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }

        let password_hash = PasswordService::hash_async(req.password).await?;

        let new_user = NewUser {
            name: req.name.trim().to_string(),
            surname: req.surname.trim().to_string(),
            email,
            password_hash,
            profile_image: non_blank(req.profile_image)
                .unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
            company_name: non_blank(req.company),
            position: non_blank(req.current_position),
            referral_source: non_blank(req.referral),
            role: Role::User,
        };

        // A concurrent registration can still win between the check and the insert
        let user = users
            .create(new_user)
            .await?
            .ok_or_else(|| ApiError::Conflict("Email already registered".to_string()))?;

        info!(user_id = user.id, "User registered");

        Ok(RegisterResponse {
            message: "User registered successfully".to_string(),
            user_id: user.id,
        })
    }

    /// Exchange credentials for an access token and a fresh refresh token
    pub async fn login(
        users: &dyn UserDirectory,
        jwt: &JwtService,
        email: &str,
        password: &str,
    ) -> Result<LoginResponse, ApiError> {
        let email = normalize_email(email);

        let Some(user) = users.find_by_email(&email).await? else {
            warn!("Login failed: unknown email");
            return Err(AuthError::InvalidCredentials.into());
        };

        let matches =
            PasswordService::verify_async(password.to_string(), user.password_hash.clone()).await?;
        if !matches {
            warn!(user_id = user.id, "Login failed: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = jwt.issue_access_token(user.id, user.role())?;
        let refresh_token = issue_refresh_token()?;
        users.set_refresh_token(user.id, Some(&refresh_token)).await?;

        info!(user_id = user.id, "User logged in");

        Ok(LoginResponse {
            token,
            refresh_token,
            user: PublicUser::from(&user),
        })
    }

    /// Rotate a refresh token. The presented value stops working.
    pub async fn refresh(
        users: &dyn UserDirectory,
        jwt: &JwtService,
        presented: &str,
    ) -> Result<TokenPair, ApiError> {
        let refresh_token = issue_refresh_token()?;

        let Some(user) = users
            .rotate_refresh_token(presented, &refresh_token)
            .await?
        else {
            warn!("Refresh rejected: token not held by any user");
            return Err(ApiError::Unauthorized("Invalid refresh token".to_string()));
        };

        let token = jwt.issue_access_token(user.id, user.role())?;

        info!(user_id = user.id, "Refresh token rotated");

        Ok(TokenPair {
            token,
            refresh_token,
        })
    }

    /// Clear the stored refresh token. Issued access tokens stay valid until
    /// they expire.
    pub async fn logout(users: &dyn UserDirectory, user_id: i64) -> Result<(), ApiError> {
        users.set_refresh_token(user_id, None).await?;
        info!(user_id, "User logged out");
        Ok(())
    }

    pub async fn get_profile(
        users: &dyn UserDirectory,
        user_id: i64,
    ) -> Result<UserProfile, ApiError> {
        let user = users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        Ok(UserProfile::from(&user))
    }

    /// Partial profile update; absent fields keep their stored value
    pub async fn update_profile(
        users: &dyn UserDirectory,
        user_id: i64,
        req: UpdateProfileRequest,
    ) -> Result<UserProfile, ApiError> {
        if let Some(name) = &req.name {
            validate_required("Name", name).map_err(|m| ApiError::invalid_field("name", m))?;
        }
        if let Some(surname) = &req.surname {
            validate_required("Surname", surname)
                .map_err(|m| ApiError::invalid_field("surname", m))?;
        }

        let changes = ProfileChanges::from(req);
        let user = users
            .update_profile(user_id, &changes)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        info!(user_id, "Profile updated");

        Ok(UserProfile::from(&user))
    }

    /// Whether the user with `target_email` currently holds the admin role
    pub async fn is_admin(
        users: &dyn UserDirectory,
        caller_id: i64,
        target_email: &str,
    ) -> Result<CheckAdminResponse, ApiError> {
        if users.find_by_id(caller_id).await?.is_none() {
            return Err(ApiError::NotFound("User not found".to_string()));
        }

        let target = users
            .find_by_email(&normalize_email(target_email))
            .await?
            .ok_or_else(|| ApiError::NotFound("Target user not found".to_string()))?;

        Ok(CheckAdminResponse {
            is_admin: target.role().is_admin(),
            user: PublicUser::from(&target),
        })
    }
}
