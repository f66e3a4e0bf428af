use axum::{extract::State, Json};

use crate::app::AppState;
use crate::database::models::ContactMessage;
use crate::handlers::ApiResult;

/// GET /api/admin/contact - stored contact messages, newest first
pub async fn contact_list(State(state): State<AppState>) -> ApiResult<Vec<ContactMessage>> {
    Ok(Json(state.contact.list().await?))
}
