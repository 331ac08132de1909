//! Crew routes
//!
//! Reads are public; writes need a caller whose stored role is admin.

use crate::auth::AdminUser;
use crate::error::ApiResult;
use crate::extract::ValidatedJson;
use crate::services::CrewService;
use crate::state::AppState;
use ambridge_shared::{CrewEnvelope, CrewListEnvelope, CrewRequest, StatusMessage};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

/// Create crew routes
pub fn crew_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_crews).post(create_crew))
        .route("/:id", get(get_crew).put(update_crew).delete(delete_crew))
}

async fn list_crews(State(state): State<AppState>) -> ApiResult<Json<CrewListEnvelope>> {
    let crews = CrewService::list(state.db()).await?;
    Ok(Json(CrewListEnvelope::success(crews)))
}

async fn get_crew(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<CrewEnvelope>> {
    let crew = CrewService::get(state.db(), &id).await?;
    Ok(Json(CrewEnvelope::success(crew, None)))
}

// AdminUser comes before the body extractor so the gate runs first
async fn create_crew(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(req): ValidatedJson<CrewRequest>,
) -> ApiResult<(StatusCode, Json<CrewEnvelope>)> {
    let crew = CrewService::create(state.db(), admin.user_id, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(CrewEnvelope::success(crew, Some("Crew member created successfully"))),
    ))
}

async fn update_crew(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<CrewRequest>,
) -> ApiResult<Json<CrewEnvelope>> {
    let crew = CrewService::update(state.db(), admin.user_id, &id, req).await?;
    Ok(Json(CrewEnvelope::success(
        crew,
        Some("Crew member updated successfully"),
    )))
}

async fn delete_crew(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<StatusMessage>> {
    CrewService::delete(state.db(), admin.user_id, &id).await?;
    Ok(Json(StatusMessage::success("Crew member deleted successfully")))
}
