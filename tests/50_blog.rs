mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

fn post(title: &str, date: &str) -> Value {
    json!({ "title": title, "excerpt": "e", "content": "c", "date": date })
}

#[tokio::test]
async fn list_is_newest_first() -> Result<()> {
    let server = common::start_server().await?;

    for (title, date) in [("old", "2024-01-01"), ("new", "2024-06-01")] {
        let res = server.client.post(server.url("/api/blog")).json(&post(title, date)).send().await?;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let listed = server.client.get(server.url("/api/blog")).send().await?.json::<Vec<Value>>().await?;
    let titles: Vec<_> = listed.iter().map(|p| p["title"].as_str().unwrap_or_default()).collect();
    assert_eq!(titles, ["new", "old"]);
    assert_eq!(listed[0]["likes"], 0);
    assert_eq!(listed[0]["tags"], json!([]));
    Ok(())
}

#[tokio::test]
async fn get_update_delete_by_id() -> Result<()> {
    let server = common::start_server().await?;

    let created = server
        .client
        .post(server.url("/api/blog"))
        .json(&post("First", "2024-01-01"))
        .send()
        .await?
        .json::<Value>()
        .await?;
    let url = server.url(&format!("/api/blog/{}", created["id"].as_str().unwrap_or_default()));

    let fetched = server.client.get(&url).send().await?.json::<Value>().await?;
    assert_eq!(fetched, created);

    let mut changed = post("Second", "2024-02-01");
    changed["likes"] = json!(3);
    let updated = server.client.put(&url).json(&changed).send().await?.json::<Value>().await?;
    assert_eq!(updated["id"], created["id"]);

    let fetched = server.client.get(&url).send().await?.json::<Value>().await?;
    assert_eq!(fetched["title"], "Second");
    assert_eq!(fetched["likes"], 3);

    let res = server.client.delete(&url).send().await?;
    assert_eq!(res.json::<Value>().await?, json!({ "ok": true }));

    let res = server.client.get(&url).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn missing_post_is_404() -> Result<()> {
    let server = common::start_server().await?;

    let res = server.client.get(server.url("/api/blog/nope")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["message"], "Blog post not found");
    Ok(())
}

#[tokio::test]
async fn update_of_missing_id_stores_nothing() -> Result<()> {
    let server = common::start_server().await?;

    let res = server
        .client
        .put(server.url("/api/blog/ghost"))
        .json(&post("Ghost", "2024-01-01"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?["id"], "ghost");

    let res = server.client.get(server.url("/api/blog/ghost")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn negative_likes_are_422() -> Result<()> {
    let server = common::start_server().await?;

    let mut body = post("Bad", "2024-01-01");
    body["likes"] = json!(-1);
    let res = server.client.post(server.url("/api/blog")).json(&body).send().await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}
