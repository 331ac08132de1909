//! Project routes
//!
//! Reads are public; writes need a signed-in user.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::extract::ValidatedJson;
use crate::services::ProjectService;
use crate::state::AppState;
use ambridge_shared::{ProjectEnvelope, ProjectListEnvelope, ProjectRequest, StatusMessage};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

/// Create project routes
pub fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route(
            "/:id",
            get(get_project).put(update_project).delete(delete_project),
        )
}

async fn list_projects(State(state): State<AppState>) -> ApiResult<Json<ProjectListEnvelope>> {
    let projects = ProjectService::list(state.db()).await?;
    Ok(Json(ProjectListEnvelope::success(projects)))
}

async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ProjectEnvelope>> {
    let project = ProjectService::get(state.db(), &id).await?;
    Ok(Json(ProjectEnvelope::success(project, None)))
}

async fn create_project(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(req): ValidatedJson<ProjectRequest>,
) -> ApiResult<(StatusCode, Json<ProjectEnvelope>)> {
    let project = ProjectService::create(state.db(), auth_user.user_id, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ProjectEnvelope::success(project, Some("Project created successfully"))),
    ))
}

async fn update_project(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<ProjectRequest>,
) -> ApiResult<Json<ProjectEnvelope>> {
    let project = ProjectService::update(state.db(), auth_user.user_id, &id, req).await?;
    Ok(Json(ProjectEnvelope::success(
        project,
        Some("Project updated successfully"),
    )))
}

async fn delete_project(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<StatusMessage>> {
    ProjectService::delete(state.db(), auth_user.user_id, &id).await?;
    Ok(Json(StatusMessage::success("Project deleted successfully")))
}
