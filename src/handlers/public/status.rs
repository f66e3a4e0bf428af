use axum::{extract::State, Json};

use crate::app::AppState;
use crate::database::models::{StatusCheck, StatusCheckCreate};
use crate::extractors::ValidJson;
use crate::handlers::ApiResult;

/// POST /api/status
pub async fn create(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<StatusCheckCreate>,
) -> ApiResult<StatusCheck> {
    Ok(Json(state.status.create(input).await?))
}

/// GET /api/status
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<StatusCheck>> {
    Ok(Json(state.status.list().await?))
}
