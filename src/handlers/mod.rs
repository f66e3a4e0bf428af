// Handlers by access tier:
// public (no credentials, /api/*) and admin (X-Admin-Token, /api/admin/*).
// Admin write routes reuse the public handlers behind the admin gate.
pub mod admin;
pub mod public;

use axum::Json;

use crate::error::ApiError;

pub type ApiResult<T> = Result<Json<T>, ApiError>;
