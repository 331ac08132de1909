//! Project repository for database operations

use ambridge_shared::{Project, ProjectRequest};
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// Project record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProjectRecord {
    pub id: i64,
    pub proj_link: String,
    pub title: String,
    pub project_type: String,
    pub cover: String,
    pub logo: String,
    pub profile_name: String,
    pub profile_pic: String,
    pub about_project: String,
    pub technologies: String,
    pub linkedin_link: String,
    pub telegram_link: String,
    pub x_link: String,
    pub youtube_link: String,
    pub github_link: String,
    pub insta_link: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProjectRecord> for Project {
    fn from(r: ProjectRecord) -> Self {
        Project {
            id: r.id,
            fields: ProjectRequest {
                proj_link: r.proj_link,
                title: r.title,
                project_type: r.project_type,
                cover: r.cover,
                logo: r.logo,
                profile_name: r.profile_name,
                profile_pic: r.profile_pic,
                about_project: r.about_project,
                technologies: r.technologies,
                linkedin_link: r.linkedin_link,
                telegram_link: r.telegram_link,
                x_link: r.x_link,
                youtube_link: r.youtube_link,
                github_link: r.github_link,
                insta_link: r.insta_link,
            },
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

const PROJECT_COLUMNS: &str = r#"
    id, proj_link, title, project_type, cover, logo, profile_name, profile_pic,
    about_project, technologies, linkedin_link, telegram_link, x_link,
    youtube_link, github_link, insta_link, created_at, updated_at
"#;

/// Project repository
pub struct ProjectRepository;

impl ProjectRepository {
    /// All live projects, oldest first
    pub async fn list(pool: &PgPool) -> Result<Vec<ProjectRecord>> {
        let projects = sqlx::query_as::<_, ProjectRecord>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE deleted_at IS NULL ORDER BY id"
        ))
        .fetch_all(pool)
        .await?;

        Ok(projects)
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<ProjectRecord>> {
        let project = sqlx::query_as::<_, ProjectRecord>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    pub async fn create(pool: &PgPool, input: &ProjectRequest) -> Result<ProjectRecord> {
        let project = sqlx::query_as::<_, ProjectRecord>(&format!(
            r#"
            INSERT INTO projects (
                proj_link, title, project_type, cover, logo, profile_name, profile_pic,
                about_project, technologies, linkedin_link, telegram_link, x_link,
                youtube_link, github_link, insta_link
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(&input.proj_link)
        .bind(&input.title)
        .bind(&input.project_type)
        .bind(&input.cover)
        .bind(&input.logo)
        .bind(&input.profile_name)
        .bind(&input.profile_pic)
        .bind(&input.about_project)
        .bind(&input.technologies)
        .bind(&input.linkedin_link)
        .bind(&input.telegram_link)
        .bind(&input.x_link)
        .bind(&input.youtube_link)
        .bind(&input.github_link)
        .bind(&input.insta_link)
        .fetch_one(pool)
        .await?;

        Ok(project)
    }

    /// Replace every editable field. `None` if the project does not exist.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        input: &ProjectRequest,
    ) -> Result<Option<ProjectRecord>> {
        let project = sqlx::query_as::<_, ProjectRecord>(&format!(
            r#"
            UPDATE projects SET
                proj_link = $2, title = $3, project_type = $4, cover = $5, logo = $6,
                profile_name = $7, profile_pic = $8, about_project = $9,
                technologies = $10, linkedin_link = $11, telegram_link = $12,
                x_link = $13, youtube_link = $14, github_link = $15, insta_link = $16,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&input.proj_link)
        .bind(&input.title)
        .bind(&input.project_type)
        .bind(&input.cover)
        .bind(&input.logo)
        .bind(&input.profile_name)
        .bind(&input.profile_pic)
        .bind(&input.about_project)
        .bind(&input.technologies)
        .bind(&input.linkedin_link)
        .bind(&input.telegram_link)
        .bind(&input.x_link)
        .bind(&input.youtube_link)
        .bind(&input.github_link)
        .bind(&input.insta_link)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Soft delete. Returns whether a live row was marked.
    pub async fn soft_delete(pool: &PgPool, id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE projects SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
