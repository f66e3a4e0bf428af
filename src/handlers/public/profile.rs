use axum::{extract::State, Json};

use crate::app::AppState;
use crate::database::models::{Profile, ProfileUpsert};
use crate::extractors::ValidJson;
use crate::handlers::ApiResult;

/// GET /api/profile
pub async fn get(State(state): State<AppState>) -> ApiResult<Profile> {
    Ok(Json(state.profile.get().await?))
}

/// PUT /api/profile
pub async fn put(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<ProfileUpsert>,
) -> ApiResult<Profile> {
    Ok(Json(state.profile.upsert(payload).await?))
}
