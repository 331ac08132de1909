//! User directory: persistence for user accounts

use ambridge_shared::{Role, UpdateProfileRequest};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// User record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password_hash: String,
    pub profile_image: Option<String>,
    pub company_name: Option<String>,
    pub company_email: Option<String>,
    pub company_address: Option<String>,
    pub company_phone: Option<String>,
    pub position: Option<String>,
    pub referral_source: Option<String>,
    pub role: String,
    pub refresh_token: Option<String>,
    pub resume_file: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Stored role; anything unrecognised is treated as a plain user
    pub fn role(&self) -> Role {
        self.role.parse().unwrap_or_default()
    }
}

/// Input for creating a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password_hash: String,
    pub profile_image: String,
    pub company_name: Option<String>,
    pub position: Option<String>,
    pub referral_source: Option<String>,
    pub role: Role,
}

/// Input for a partial profile update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
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

impl From<UpdateProfileRequest> for ProfileChanges {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            name: req.name.map(|v| v.trim().to_string()),
            surname: req.surname.map(|v| v.trim().to_string()),
            profile_image: req.profile_image,
            company_name: req.company_name,
            company_email: req.company_email,
            company_address: req.company_address,
            company_phone: req.company_phone,
            position: req.position,
            referral_source: req.referral_source,
            resume_file: req.resume_file,
        }
    }
}

/// Persistent store of user accounts
///
/// Lookups ignore soft-deleted rows. Emails are passed in already
/// normalized.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>>;

    /// Insert a user. Returns `None` when the email is already taken.
    async fn create(&self, user: NewUser) -> Result<Option<UserRecord>>;

    /// Overwrite (or clear, with `None`) the stored refresh token
    async fn set_refresh_token(&self, id: i64, token: Option<&str>) -> Result<()>;

    /// Replace `old` with `new` on the user holding `old`, atomically.
    /// Returns `None` when no user holds `old`.
    async fn rotate_refresh_token(&self, old: &str, new: &str) -> Result<Option<UserRecord>>;

    async fn update_profile(&self, id: i64, changes: &ProfileChanges)
        -> Result<Option<UserRecord>>;
}

const USER_COLUMNS: &str = r#"
    id, name, surname, email, password_hash, profile_image,
    company_name, company_email, company_address, company_phone,
    position, referral_source, role, refresh_token, resume_file,
    created_at, updated_at
"#;

/// PostgreSQL-backed user directory
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for UserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND deleted_at IS NULL"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, user: NewUser) -> Result<Option<UserRecord>> {
        // The partial unique index on email settles concurrent registrations
        let created = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            INSERT INTO users (name, surname, email, password_hash, profile_image,
                               company_name, position, referral_source, role)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (email) WHERE deleted_at IS NULL DO NOTHING
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.name)
        .bind(&user.surname)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.profile_image)
        .bind(&user.company_name)
        .bind(&user.position)
        .bind(&user.referral_source)
        .bind(user.role.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(created)
    }

    async fn set_refresh_token(&self, id: i64, token: Option<&str>) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET refresh_token = $2, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(token)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn rotate_refresh_token(&self, old: &str, new: &str) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            UPDATE users
            SET refresh_token = $2, updated_at = NOW()
            WHERE refresh_token = $1 AND deleted_at IS NULL
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(old)
        .bind(new)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update_profile(
        &self,
        id: i64,
        changes: &ProfileChanges,
    ) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                surname = COALESCE($3, surname),
                profile_image = COALESCE($4, profile_image),
                company_name = COALESCE($5, company_name),
                company_email = COALESCE($6, company_email),
                company_address = COALESCE($7, company_address),
                company_phone = COALESCE($8, company_phone),
                position = COALESCE($9, position),
                referral_source = COALESCE($10, referral_source),
                resume_file = COALESCE($11, resume_file),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.surname)
        .bind(&changes.profile_image)
        .bind(&changes.company_name)
        .bind(&changes.company_email)
        .bind(&changes.company_address)
        .bind(&changes.company_phone)
        .bind(&changes.position)
        .bind(&changes.referral_source)
        .bind(&changes.resume_file)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
