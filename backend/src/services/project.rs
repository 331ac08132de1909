//! Project listings

use crate::error::ApiError;
use crate::repositories::ProjectRepository;
use ambridge_shared::validation::{parse_id, validate_required};
use ambridge_shared::{Project, ProjectRequest};
use sqlx::PgPool;
use tracing::info;

fn project_id(raw: &str) -> Result<i64, ApiError> {
    parse_id(raw).ok_or_else(|| ApiError::BadRequest("Invalid project ID".to_string()))
}

fn not_found() -> ApiError {
    ApiError::NotFound("Project not found".to_string())
}

fn check_title(input: &ProjectRequest) -> Result<(), ApiError> {
    validate_required("Title", &input.title).map_err(|m| ApiError::invalid_field("title", m))
}

/// Project service
pub struct ProjectService;

impl ProjectService {
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, ApiError> {
        let projects = ProjectRepository::list(pool).await?;
        Ok(projects.into_iter().map(Project::from).collect())
    }

    pub async fn get(pool: &PgPool, raw_id: &str) -> Result<Project, ApiError> {
        let id = project_id(raw_id)?;
        ProjectRepository::find_by_id(pool, id)
            .await?
            .map(Project::from)
            .ok_or_else(not_found)
    }

    pub async fn create(
        pool: &PgPool,
        user_id: i64,
        input: ProjectRequest,
    ) -> Result<Project, ApiError> {
        check_title(&input)?;
        let project = ProjectRepository::create(pool, &input).await?;
        info!(user_id, project_id = project.id, "Project created");
        Ok(project.into())
    }

    /// Replace all editable fields of a project
    pub async fn update(
        pool: &PgPool,
        user_id: i64,
        raw_id: &str,
        input: ProjectRequest,
    ) -> Result<Project, ApiError> {
        let id = project_id(raw_id)?;
        check_title(&input)?;
        let project = ProjectRepository::update(pool, id, &input)
            .await?
            .ok_or_else(not_found)?;
        info!(user_id, project_id = id, "Project updated");
        Ok(project.into())
    }

    pub async fn delete(pool: &PgPool, user_id: i64, raw_id: &str) -> Result<(), ApiError> {
        let id = project_id(raw_id)?;
        if !ProjectRepository::soft_delete(pool, id).await? {
            return Err(not_found());
        }
        info!(user_id, project_id = id, "Project deleted");
        Ok(())
    }
}
