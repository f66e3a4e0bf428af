pub mod resend;

use async_trait::async_trait;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::sync::Arc;

use crate::config::MailConfig;

pub use resend::ResendNotifier;

/// Result of one dispatch attempt, rendered as `{sent, id}` or `{sent, reason}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailOutcome {
    Sent { id: Option<String> },
    NotSent { reason: String },
}

impl EmailOutcome {
    pub fn not_sent(reason: impl Into<String>) -> Self {
        EmailOutcome::NotSent { reason: reason.into() }
    }

    pub fn is_sent(&self) -> bool {
        matches!(self, EmailOutcome::Sent { .. })
    }
}

impl Serialize for EmailOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        match self {
            EmailOutcome::Sent { id } => {
                map.serialize_entry("sent", &true)?;
                map.serialize_entry("id", id)?;
            }
            EmailOutcome::NotSent { reason } => {
                map.serialize_entry("sent", &false)?;
                map.serialize_entry("reason", reason)?;
            }
        }
        map.end()
    }
}

/// Outbound email. Implementations report failure in the outcome and never
/// return an error.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html: &str) -> EmailOutcome;
}

/// Used when no mail provider is configured
pub struct DisabledNotifier {
    reason: String,
}

impl DisabledNotifier {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn send(&self, _to: &str, _subject: &str, _html: &str) -> EmailOutcome {
        EmailOutcome::not_sent(self.reason.clone())
    }
}

/// Resend when an API key is present, otherwise a disabled notifier
pub fn from_config(config: &MailConfig) -> Result<Arc<dyn Notifier>, reqwest::Error> {
    match config.resend_api_key {
        Some(ref key) => {
            tracing::info!("Contact notifications via Resend ({})", config.resend_api_url);
            Ok(Arc::new(ResendNotifier::new(config, key.clone())?))
        }
        None => {
            tracing::info!("RESEND_API_KEY not set; contact notifications disabled");
            Ok(Arc::new(DisabledNotifier::new("RESEND_API_KEY not set")))
        }
    }
}
