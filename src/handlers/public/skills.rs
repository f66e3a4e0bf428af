use axum::{extract::State, Json};

use crate::app::AppState;
use crate::database::models::SkillGroup;
use crate::extractors::ValidJson;
use crate::handlers::ApiResult;

/// GET /api/skills
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<SkillGroup>> {
    Ok(Json(state.skills.list().await?))
}

/// PUT /api/skills - replaces every group
pub async fn replace(
    State(state): State<AppState>,
    ValidJson(groups): ValidJson<Vec<SkillGroup>>,
) -> ApiResult<Vec<SkillGroup>> {
    Ok(Json(state.skills.replace_all(groups).await?))
}
