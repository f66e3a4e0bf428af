mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn profile_missing_until_first_put() -> Result<()> {
    let server = common::start_server().await?;

    let res = server.client.get(server.url("/api/profile")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], true);
    assert_eq!(body["message"], "Profile not found");
    assert_eq!(body["code"], "NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn put_twice_keeps_one_id() -> Result<()> {
    let server = common::start_server().await?;

    let first = server
        .client
        .put(server.url("/api/profile"))
        .json(&json!({ "full_name": "Ada Lovelace", "title": "Engineer" }))
        .send()
        .await?;
    assert_eq!(first.status(), StatusCode::OK);
    let first = first.json::<Value>().await?;
    assert!(!first["id"].as_str().unwrap_or_default().is_empty());
    assert_eq!(first["availability"], true);
    assert!(first["headline"].is_null());
    assert!(first["links"]["github"].is_null());

    let second = server
        .client
        .put(server.url("/api/profile"))
        .json(&json!({
            "full_name": "Ada Lovelace",
            "title": "Mathematician",
            "availability": false,
            "links": { "github": "https://github.com/ada" }
        }))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(second["id"], first["id"]);

    let fetched = server.client.get(server.url("/api/profile")).send().await?.json::<Value>().await?;
    assert_eq!(fetched, second);
    assert_eq!(fetched["title"], "Mathematician");
    assert_eq!(fetched["availability"], false);
    assert_eq!(fetched["links"]["github"], "https://github.com/ada");
    Ok(())
}

#[tokio::test]
async fn put_without_required_field_is_422() -> Result<()> {
    let server = common::start_server().await?;

    let res = server
        .client
        .put(server.url("/api/profile"))
        .json(&json!({ "title": "No name" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(res.json::<Value>().await?["code"], "VALIDATION_ERROR");

    let res = server.client.get(server.url("/api/profile")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_400() -> Result<()> {
    let server = common::start_server().await?;

    let res = server
        .client
        .put(server.url("/api/profile"))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["code"], "INVALID_JSON");
    Ok(())
}
