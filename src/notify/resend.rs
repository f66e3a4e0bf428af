use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{EmailOutcome, Notifier};
use crate::config::MailConfig;

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: Option<String>,
}

/// Resend HTTP API client (`POST {api_url}/emails`)
pub struct ResendNotifier {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    from: String,
}

impl ResendNotifier {
    pub fn new(config: &MailConfig, api_key: String) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/emails", config.resend_api_url.trim_end_matches('/')),
            api_key,
            from: config.from.clone(),
        })
    }

    async fn dispatch(&self, to: &str, subject: &str, html: &str) -> Result<Option<String>, reqwest::Error> {
        let body = SendEmailRequest {
            from: &self.from,
            to: [to],
            subject,
            html,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let parsed = response.json::<SendEmailResponse>().await?;
        Ok(parsed.id)
    }
}

#[async_trait]
impl Notifier for ResendNotifier {
    async fn send(&self, to: &str, subject: &str, html: &str) -> EmailOutcome {
        match self.dispatch(to, subject, html).await {
            Ok(id) => EmailOutcome::Sent { id },
            Err(e) => {
                tracing::error!("Resend send error: {}", e);
                EmailOutcome::not_sent(e.to_string())
            }
        }
    }
}
