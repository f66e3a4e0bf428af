use axum::{extract::State, Json};

use crate::app::AppState;
use crate::database::models::ContactCreate;
use crate::extractors::ValidJson;
use crate::handlers::ApiResult;
use crate::services::ContactReceipt;

/// POST /api/contact - stores the message and emails it when mail is configured
pub async fn create(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<ContactCreate>,
) -> ApiResult<ContactReceipt> {
    Ok(Json(state.contact.create(input).await?))
}
