mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use portfolio_api::notify::EmailOutcome;

fn message() -> Value {
    json!({ "name": "Grace", "email": "grace@example.com", "message": "<script>hi</script>" })
}

#[tokio::test]
async fn persists_when_mail_is_disabled() -> Result<()> {
    let server = common::server().admin_token(common::ADMIN_TOKEN).start().await?;

    let res = server.client.post(server.url("/api/contact")).json(&message()).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>().await?,
        json!({ "ok": true, "email": { "sent": false, "reason": "RESEND_API_KEY not set" } })
    );

    let stored = server
        .client
        .get(server.url("/api/admin/contact"))
        .header("X-Admin-Token", common::ADMIN_TOKEN)
        .send()
        .await?
        .json::<Vec<Value>>()
        .await?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["name"], "Grace");
    assert!(stored[0]["created_at"].is_string());
    assert!(!stored[0]["id"].as_str().unwrap_or_default().is_empty());
    Ok(())
}

#[tokio::test]
async fn emails_sender_with_escaped_body() -> Result<()> {
    let notifier = common::RecordingNotifier::new(EmailOutcome::Sent {
        id: Some("re_42".into()),
    });
    let server = common::server().notifier(notifier.clone()).start().await?;

    let receipt = server
        .client
        .post(server.url("/api/contact"))
        .json(&message())
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(receipt, json!({ "ok": true, "email": { "sent": true, "id": "re_42" } }));

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "grace@example.com");
    assert_eq!(sent[0].subject, "New contact message from Grace");
    assert!(sent[0].html.contains("&lt;script&gt;hi&lt;/script&gt;"));
    assert!(!sent[0].html.contains("<script>"));
    Ok(())
}

#[tokio::test]
async fn recipient_override_is_used() -> Result<()> {
    let notifier = common::RecordingNotifier::new(EmailOutcome::not_sent("provider down"));
    let server = common::server()
        .notifier(notifier.clone())
        .recipient_override("owner@example.com")
        .start()
        .await?;

    let receipt = server.client.post(server.url("/api/contact")).json(&message()).send().await?.json::<Value>().await?;
    assert_eq!(receipt["ok"], true);
    assert_eq!(receipt["email"], json!({ "sent": false, "reason": "provider down" }));
    assert_eq!(notifier.sent()[0].to, "owner@example.com");
    Ok(())
}

#[tokio::test]
async fn missing_field_is_422_and_nothing_sent() -> Result<()> {
    let notifier = common::RecordingNotifier::new(EmailOutcome::Sent { id: None });
    let server = common::server().notifier(notifier.clone()).start().await?;

    let res = server
        .client
        .post(server.url("/api/contact"))
        .json(&json!({ "name": "Grace", "email": "grace@example.com" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(notifier.sent().is_empty());
    Ok(())
}
