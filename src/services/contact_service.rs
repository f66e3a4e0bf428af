use serde::Serialize;
use std::sync::Arc;

use crate::database::models::{ContactCreate, ContactMessage};
use crate::database::{DatabaseError, RecordStore, Repository};
use crate::filter::FilterData;
use crate::notify::{EmailOutcome, Notifier};

pub const CONTACT_COLLECTION: &str = "contact_messages";

/// Response to a contact submission
#[derive(Debug, Clone, Serialize)]
pub struct ContactReceipt {
    pub ok: bool,
    pub email: EmailOutcome,
}

#[derive(Clone)]
pub struct ContactService {
    repo: Repository<ContactMessage>,
    notifier: Arc<dyn Notifier>,
    recipient_override: Option<String>,
}

impl ContactService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        notifier: Arc<dyn Notifier>,
        recipient_override: Option<String>,
    ) -> Self {
        Self {
            repo: Repository::new(CONTACT_COLLECTION, store),
            notifier,
            recipient_override,
        }
    }

    /// Store the message, then try to email it. A failed email is reported in
    /// the receipt and does not fail the call.
    pub async fn create(&self, input: ContactCreate) -> Result<ContactReceipt, DatabaseError> {
        let message = ContactMessage::new(input);
        self.repo.insert_one(&message).await?;

        let to = self.recipient_override.as_deref().unwrap_or(&message.email);
        let subject = format!("New contact message from {}", message.name);
        let email = self.notifier.send(to, &subject, &render_html(&message)).await;
        if !email.is_sent() {
            tracing::warn!("Contact message {} stored but not emailed", message.id);
        }

        Ok(ContactReceipt { ok: true, email })
    }

    /// Newest first, ordered by the store so the list limit keeps the latest
    pub async fn list(&self) -> Result<Vec<ContactMessage>, DatabaseError> {
        self.repo
            .select_any(FilterData::all().order_by("created_at desc"))
            .await
    }
}

fn render_html(message: &ContactMessage) -> String {
    format!(
        "<h2>New contact message</h2>\
         <p><strong>Name:</strong> {}</p>\
         <p><strong>Email:</strong> {}</p>\
         <p><strong>Message:</strong></p>\
         <p style=\"white-space: pre-wrap\">{}</p>",
        escape_html(&message.name),
        escape_html(&message.email),
        escape_html(&message.message),
    )
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
