use sha2::{Digest, Sha256};

use crate::error::ApiError;

/// Token check guarding the admin routes
#[derive(Clone)]
pub enum AdminGate {
    /// No admin token configured; every admin call is refused
    Unconfigured,
    Configured(String),
}

impl AdminGate {
    pub fn new(admin_token: Option<String>) -> Self {
        match admin_token {
            Some(token) if !token.is_empty() => AdminGate::Configured(token),
            _ => AdminGate::Unconfigured,
        }
    }

    pub fn authorize(&self, presented: Option<&str>) -> Result<(), ApiError> {
        let secret = match self {
            AdminGate::Unconfigured => return Err(ApiError::service_unavailable("Admin is not configured")),
            AdminGate::Configured(secret) => secret,
        };

        match presented {
            Some(token) if constant_time_eq(token, secret) => Ok(()),
            _ => Err(ApiError::unauthorized("Unauthorized")),
        }
    }
}

impl std::fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdminGate::Unconfigured => f.write_str("AdminGate::Unconfigured"),
            AdminGate::Configured(_) => f.write_str("AdminGate::Configured(..)"),
        }
    }
}

/// Compares fixed-length digests so neither content nor length leaks timing.
fn constant_time_eq(a: &str, b: &str) -> bool {
    let da = Sha256::digest(a.as_bytes());
    let db = Sha256::digest(b.as_bytes());

    let mut result = 0u8;
    for (x, y) in da.iter().zip(db.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn unconfigured_refuses_everything() {
        let gate = AdminGate::new(None);
        let err = gate.authorize(Some("anything")).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.message(), "Admin is not configured");

        assert!(matches!(AdminGate::new(Some(String::new())), AdminGate::Unconfigured));
    }

    #[test]
    fn configured_requires_exact_token() {
        let gate = AdminGate::new(Some("s3cret".into()));
        assert!(gate.authorize(Some("s3cret")).is_ok());

        for bad in [None, Some(""), Some("s3cre"), Some("s3cret "), Some("S3CRET")] {
            let err = gate.authorize(bad).unwrap_err();
            assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn debug_hides_secret() {
        let gate = AdminGate::new(Some("s3cret".into()));
        assert!(!format!("{:?}", gate).contains("s3cret"));
    }
}
