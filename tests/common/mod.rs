#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use async_trait::async_trait;

use portfolio_api::config::AppConfig;
use portfolio_api::database::{MemoryRecordStore, RecordStore};
use portfolio_api::notify::{DisabledNotifier, EmailOutcome, Notifier};
use portfolio_api::{router, AppState};

pub const ADMIN_TOKEN: &str = "test-admin-token";

/// A server on its own port with its own in-memory store
pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub struct TestServerBuilder {
    admin_token: Option<String>,
    notifier: Arc<dyn Notifier>,
    recipient_override: Option<String>,
}

impl TestServerBuilder {
    pub fn admin_token(mut self, token: &str) -> Self {
        self.admin_token = Some(token.to_string());
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn recipient_override(mut self, to: &str) -> Self {
        self.recipient_override = Some(to.to_string());
        self
    }

    pub async fn start(self) -> Result<TestServer> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let mut config = AppConfig::development();
        config.security.admin_token = self.admin_token;
        config.mail.to = self.recipient_override;
        config.api.enable_request_logging = false;

        let store: Arc<dyn RecordStore> = Arc::new(MemoryRecordStore::new(config.storage.list_limit));
        let app = router(AppState::new(store, self.notifier, &config), &config);

        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test server")?;

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(TestServer {
            base_url: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
        })
    }
}

pub fn server() -> TestServerBuilder {
    TestServerBuilder {
        admin_token: None,
        notifier: Arc::new(DisabledNotifier::new("RESEND_API_KEY not set")),
        recipient_override: None,
    }
}

/// Default server: no admin token, mail disabled
pub async fn start_server() -> Result<TestServer> {
    server().start().await
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Notifier that records every send and answers with a fixed outcome
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<SentEmail>>,
    outcome: EmailOutcome,
}

impl RecordingNotifier {
    pub fn new(outcome: EmailOutcome) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            outcome,
        })
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, to: &str, subject: &str, html: &str) -> EmailOutcome {
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            html: html.to_string(),
        });
        self.outcome.clone()
    }
}
