//! API request and response types
//!
//! Field names follow the wire format the existing web client already speaks,
//! so several structs mix camelCase and snake_case on purpose.

use crate::models::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

const SUCCESS: &str = "success";

// ============================================================================
// Authentication
// ============================================================================

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Surname is required"))]
    pub surname: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    pub profile_image: Option<String>,
    pub referral: Option<String>,
    pub company: Option<String>,
    pub current_position: Option<String>,
}

/// Registration response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i64,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Public projection of a user, returned by login and the admin check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub role: Role,
    pub profile_image: Option<String>,
    pub referral: Option<String>,
    pub company: Option<String>,
    pub current_position: Option<String>,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub refresh_token: String,
    pub user: PublicUser,
}

/// Refresh token request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Access + refresh token pair returned by a refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub token: String,
    pub refresh_token: String,
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Profile
// ============================================================================

/// Full profile of the authenticated user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_file: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial profile update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Surname cannot be empty"))]
    pub surname: Option<String>,
    pub profile_image: Option<String>,
    pub company_name: Option<String>,
    pub company_email: Option<String>,
    pub company_address: Option<String>,
    pub company_phone: Option<String>,
    pub position: Option<String>,
    pub referral_source: Option<String>,
    pub resume_file: Option<String>,
}

/// Admin check request. `username` carries the target's email.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckAdminRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
}

/// Admin check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckAdminResponse {
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    pub user: PublicUser,
}

// ============================================================================
// Projects
// ============================================================================

/// Editable project fields; also the create/update request body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProjectRequest {
    #[serde(default, rename = "projlink")]
    pub proj_link: String,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(default, rename = "type")]
    pub project_type: String,
    #[serde(default)]
    pub cover: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default, rename = "profilename")]
    pub profile_name: String,
    #[serde(default, rename = "profilepic")]
    pub profile_pic: String,
    #[serde(default, rename = "aboutproject")]
    pub about_project: String,
    #[serde(default)]
    pub technologies: String,
    #[serde(default)]
    pub linkedin_link: String,
    #[serde(default)]
    pub telegram_link: String,
    #[serde(default)]
    pub x_link: String,
    #[serde(default)]
    pub youtube_link: String,
    #[serde(default)]
    pub github_link: String,
    #[serde(default)]
    pub insta_link: String,
}

/// Stored project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    #[serde(flatten)]
    pub fields: ProjectRequest,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Single-project envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEnvelope {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub project: Project,
}

impl ProjectEnvelope {
    pub fn success(project: Project, message: Option<&str>) -> Self {
        Self {
            status: SUCCESS.to_string(),
            message: message.map(str::to_string),
            project,
        }
    }
}

/// Project list envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectListEnvelope {
    pub status: String,
    pub projects: Vec<Project>,
}

impl ProjectListEnvelope {
    pub fn success(projects: Vec<Project>) -> Self {
        Self {
            status: SUCCESS.to_string(),
            projects,
        }
    }
}

// ============================================================================
// Crew
// ============================================================================

/// Editable crew member fields; also the create/update request body
///
/// `role` is the member's job title on the team page, not an access role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CrewRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub urlphoto: String,
}

/// Stored crew member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: i64,
    #[serde(flatten)]
    pub fields: CrewRequest,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Single crew member envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewEnvelope {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub crew: CrewMember,
}

impl CrewEnvelope {
    pub fn success(crew: CrewMember, message: Option<&str>) -> Self {
        Self {
            status: SUCCESS.to_string(),
            message: message.map(str::to_string),
            crew,
        }
    }
}

/// Crew list envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewListEnvelope {
    pub status: String,
    pub crews: Vec<CrewMember>,
}

impl CrewListEnvelope {
    pub fn success(crews: Vec<CrewMember>) -> Self {
        Self {
            status: SUCCESS.to_string(),
            crews,
        }
    }
}

/// Status + message, used by deletes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusMessage {
    pub status: String,
    pub message: String,
}

impl StatusMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: SUCCESS.to_string(),
            message: message.into(),
        }
    }
}
