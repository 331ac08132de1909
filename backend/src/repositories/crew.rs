//! Crew member repository for database operations

use ambridge_shared::{CrewMember, CrewRequest};
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// Crew member record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CrewRecord {
    pub id: i64,
    pub username: String,
    pub role: String,
    pub about: String,
    pub url_photo: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CrewRecord> for CrewMember {
    fn from(r: CrewRecord) -> Self {
        CrewMember {
            id: r.id,
            fields: CrewRequest {
                username: r.username,
                role: r.role,
                about: r.about,
                urlphoto: r.url_photo,
            },
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Crew repository
pub struct CrewRepository;

impl CrewRepository {
    /// All live crew members, oldest first
    pub async fn list(pool: &PgPool) -> Result<Vec<CrewRecord>> {
        let crews = sqlx::query_as::<_, CrewRecord>(
            r#"
            SELECT id, username, role, about, url_photo, created_at, updated_at
            FROM crews
            WHERE deleted_at IS NULL
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(crews)
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<CrewRecord>> {
        let crew = sqlx::query_as::<_, CrewRecord>(
            r#"
            SELECT id, username, role, about, url_photo, created_at, updated_at
            FROM crews
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(crew)
    }

    pub async fn create(pool: &PgPool, input: &CrewRequest) -> Result<CrewRecord> {
        let crew = sqlx::query_as::<_, CrewRecord>(
            r#"
            INSERT INTO crews (username, role, about, url_photo)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, role, about, url_photo, created_at, updated_at
            "#,
        )
        .bind(&input.username)
        .bind(&input.role)
        .bind(&input.about)
        .bind(&input.urlphoto)
        .fetch_one(pool)
        .await?;

        Ok(crew)
    }

    pub async fn update(pool: &PgPool, id: i64, input: &CrewRequest) -> Result<Option<CrewRecord>> {
        let crew = sqlx::query_as::<_, CrewRecord>(
            r#"
            UPDATE crews
            SET username = $2, role = $3, about = $4, url_photo = $5, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, username, role, about, url_photo, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&input.username)
        .bind(&input.role)
        .bind(&input.about)
        .bind(&input.urlphoto)
        .fetch_optional(pool)
        .await?;

        Ok(crew)
    }

    pub async fn soft_delete(pool: &PgPool, id: i64) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE crews SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
