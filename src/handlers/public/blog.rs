use axum::{
    extract::{Path, State},
    Json,
};

use super::{deleted, Deleted};
use crate::app::AppState;
use crate::database::models::BlogPost;
use crate::extractors::ValidJson;
use crate::handlers::ApiResult;

/// GET /api/blog
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<BlogPost>> {
    Ok(Json(state.blog.list().await?))
}

/// GET /api/blog/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<BlogPost> {
    Ok(Json(state.blog.get(&id).await?))
}

/// POST /api/blog
pub async fn create(State(state): State<AppState>, ValidJson(post): ValidJson<BlogPost>) -> ApiResult<BlogPost> {
    Ok(Json(state.blog.create(post).await?))
}

/// PUT /api/blog/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(post): ValidJson<BlogPost>,
) -> ApiResult<BlogPost> {
    Ok(Json(state.blog.update(&id, post).await?))
}

/// DELETE /api/blog/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Deleted> {
    state.blog.delete(&id).await?;
    Ok(deleted())
}
