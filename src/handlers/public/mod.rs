pub mod blog;
pub mod contact;
pub mod profile;
pub mod projects;
pub mod skills;
pub mod status;

use axum::Json;
use serde::Serialize;

/// Body returned by deletes
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub ok: bool,
}

pub(crate) fn deleted() -> Json<Deleted> {
    Json(Deleted { ok: true })
}
