//! Crew member profiles
//!
//! Mutations are gated on the admin role by the route layer.

use crate::error::ApiError;
use crate::repositories::CrewRepository;
use ambridge_shared::validation::{parse_id, validate_required};
use ambridge_shared::{CrewMember, CrewRequest};
use sqlx::PgPool;
use tracing::info;

fn crew_id(raw: &str) -> Result<i64, ApiError> {
    parse_id(raw).ok_or_else(|| ApiError::BadRequest("Invalid crew member ID".to_string()))
}

fn not_found() -> ApiError {
    ApiError::NotFound("Crew member not found".to_string())
}

fn check_required(input: &CrewRequest) -> Result<(), ApiError> {
    validate_required("Username", &input.username)
        .map_err(|m| ApiError::invalid_field("username", m))?;
    validate_required("Role", &input.role).map_err(|m| ApiError::invalid_field("role", m))
}

/// Crew service
pub struct CrewService;

impl CrewService {
    pub async fn list(pool: &PgPool) -> Result<Vec<CrewMember>, ApiError> {
        let crews = CrewRepository::list(pool).await?;
        Ok(crews.into_iter().map(CrewMember::from).collect())
    }

    pub async fn get(pool: &PgPool, raw_id: &str) -> Result<CrewMember, ApiError> {
        let id = crew_id(raw_id)?;
        CrewRepository::find_by_id(pool, id)
            .await?
            .map(CrewMember::from)
            .ok_or_else(not_found)
    }

    pub async fn create(
        pool: &PgPool,
        admin_id: i64,
        input: CrewRequest,
    ) -> Result<CrewMember, ApiError> {
        check_required(&input)?;
        let crew = CrewRepository::create(pool, &input).await?;
        info!(admin_id, crew_id = crew.id, "Crew member created");
        Ok(crew.into())
    }

    pub async fn update(
        pool: &PgPool,
        admin_id: i64,
        raw_id: &str,
        input: CrewRequest,
    ) -> Result<CrewMember, ApiError> {
        let id = crew_id(raw_id)?;
        check_required(&input)?;
        let crew = CrewRepository::update(pool, id, &input)
            .await?
            .ok_or_else(not_found)?;
        info!(admin_id, crew_id = id, "Crew member updated");
        Ok(crew.into())
    }

    pub async fn delete(pool: &PgPool, admin_id: i64, raw_id: &str) -> Result<(), ApiError> {
        let id = crew_id(raw_id)?;
        if !CrewRepository::soft_delete(pool, id).await? {
            return Err(not_found());
        }
        info!(admin_id, crew_id = id, "Crew member deleted");
        Ok(())
    }
}
