use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::AdminGate;
use crate::error::ApiError;

pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Rejects admin requests before any body is read
pub async fn admin_gate_middleware(
    State(gate): State<AdminGate>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = request
        .headers()
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok());

    if let Err(e) = gate.authorize(presented) {
        tracing::warn!("Admin request to {} rejected: {}", request.uri().path(), e);
        return Err(e);
    }

    Ok(next.run(request).await)
}
