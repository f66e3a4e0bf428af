mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

fn project() -> Value {
    json!({ "title": "Admin", "description": "d", "category": "c", "year": 2024 })
}

#[tokio::test]
async fn unconfigured_gate_is_503() -> Result<()> {
    let server = common::start_server().await?;

    let res = server
        .client
        .post(server.url("/api/admin/projects"))
        .header("X-Admin-Token", "anything")
        .json(&project())
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(res.json::<Value>().await?["message"], "Admin is not configured");

    let listed = server.client.get(server.url("/api/projects")).send().await?.json::<Vec<Value>>().await?;
    assert!(listed.is_empty());
    Ok(())
}

#[tokio::test]
async fn wrong_or_missing_token_is_401() -> Result<()> {
    let server = common::server().admin_token(common::ADMIN_TOKEN).start().await?;

    let missing = server.client.post(server.url("/api/admin/projects")).json(&project()).send().await?;
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(missing.json::<Value>().await?["message"], "Unauthorized");

    let wrong = server
        .client
        .put(server.url("/api/admin/skills"))
        .header("X-Admin-Token", "nope")
        .json(&json!([]))
        .send()
        .await?;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let list = server.client.get(server.url("/api/admin/contact")).send().await?;
    assert_eq!(list.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn bad_token_rejected_before_body_validation() -> Result<()> {
    let server = common::server().admin_token(common::ADMIN_TOKEN).start().await?;

    let res = server
        .client
        .post(server.url("/api/admin/blog"))
        .header("X-Admin-Token", "nope")
        .json(&json!({ "title": 1 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn correct_token_behaves_like_public_route() -> Result<()> {
    let server = common::server().admin_token(common::ADMIN_TOKEN).start().await?;
    let admin = |req: reqwest::RequestBuilder| req.header("X-Admin-Token", common::ADMIN_TOKEN);

    let created = admin(server.client.post(server.url("/api/admin/projects")))
        .json(&project())
        .send()
        .await?;
    assert_eq!(created.status(), StatusCode::OK);
    let created = created.json::<Value>().await?;
    let id = created["id"].as_str().unwrap_or_default().to_string();

    let mut changed = project();
    changed["title"] = json!("Renamed");
    let updated = admin(server.client.put(server.url(&format!("/api/admin/projects/{}", id))))
        .json(&changed)
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(updated["id"], id.as_str());

    let listed = server.client.get(server.url("/api/projects")).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["title"], "Renamed");

    let skills = admin(server.client.put(server.url("/api/admin/skills")))
        .json(&json!([{ "group": "A", "items": [] }]))
        .send()
        .await?;
    assert_eq!(skills.status(), StatusCode::OK);

    let post = admin(server.client.post(server.url("/api/admin/blog")))
        .json(&json!({ "title": "t", "excerpt": "e", "content": "c", "date": "2024-01-01" }))
        .send()
        .await?
        .json::<Value>()
        .await?;
    let blog_url = server.url(&format!("/api/admin/blog/{}", post["id"].as_str().unwrap_or_default()));
    let deleted = admin(server.client.delete(&blog_url)).send().await?;
    assert_eq!(deleted.json::<Value>().await?, json!({ "ok": true }));

    let deleted = admin(server.client.delete(server.url(&format!("/api/admin/projects/{}", id))))
        .send()
        .await?;
    assert_eq!(deleted.json::<Value>().await?, json!({ "ok": true }));
    Ok(())
}

#[tokio::test]
async fn admin_contact_list_is_newest_first() -> Result<()> {
    let server = common::server().admin_token(common::ADMIN_TOKEN).start().await?;

    for name in ["first", "second"] {
        server
            .client
            .post(server.url("/api/contact"))
            .json(&json!({ "name": name, "email": "a@b.dev", "message": "m" }))
            .send()
            .await?;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let listed = server
        .client
        .get(server.url("/api/admin/contact"))
        .header("X-Admin-Token", common::ADMIN_TOKEN)
        .send()
        .await?
        .json::<Vec<Value>>()
        .await?;
    let names: Vec<_> = listed.iter().map(|m| m["name"].as_str().unwrap_or_default()).collect();
    assert_eq!(names, ["second", "first"]);
    Ok(())
}
