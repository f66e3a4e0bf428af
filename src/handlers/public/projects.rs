use axum::{
    extract::{Path, State},
    Json,
};

use super::{deleted, Deleted};
use crate::app::AppState;
use crate::database::models::Project;
use crate::extractors::ValidJson;
use crate::handlers::ApiResult;

/// GET /api/projects
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Project>> {
    Ok(Json(state.projects.list().await?))
}

/// POST /api/projects
pub async fn create(State(state): State<AppState>, ValidJson(project): ValidJson<Project>) -> ApiResult<Project> {
    Ok(Json(state.projects.create(project).await?))
}

/// PUT /api/projects/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(project): ValidJson<Project>,
) -> ApiResult<Project> {
    Ok(Json(state.projects.update(&id, project).await?))
}

/// DELETE /api/projects/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Deleted> {
    state.projects.delete(&id).await?;
    Ok(deleted())
}
