use anyhow::{anyhow, ensure};
use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::cli::client::{ApiClient, Route};
use crate::cli::utils::output_check;
use crate::cli::OutputFormat;
use crate::database::models::{BlogPost, Profile, ProfileUpsert, Project, SkillGroup, StatusCheck};

pub async fn handle(client: &ApiClient, admin: bool, output_format: OutputFormat) -> anyhow::Result<()> {
    let route = if admin { Route::Admin } else { Route::Public };

    let checks = [
        ("status", check_status(client).await),
        ("profile keeps its id", check_profile(client).await),
        ("project lifecycle", check_projects(client, route).await),
        ("skills replace", check_skills(client, route).await),
        ("blog lifecycle", check_blog(client, route).await),
        ("contact", check_contact(client).await),
    ];

    let mut failed = 0;
    for (name, result) in &checks {
        output_check(output_format, name, result)?;
        if result.is_err() {
            failed += 1;
        }
    }

    ensure!(failed == 0, "{} of {} checks failed", failed, checks.len());
    Ok(())
}

async fn check_status(client: &ApiClient) -> anyhow::Result<()> {
    let created: StatusCheck = client
        .post(Route::Public, "/status", &json!({ "client_name": "portfolio-smoke" }))
        .await?;
    ensure!(!created.id.is_empty(), "status check has no id");

    let listed: Vec<StatusCheck> = client.get("/status").await?;
    ensure!(listed.iter().any(|s| s.id == created.id), "new status check not listed");
    Ok(())
}

/// Upserts twice, then restores whatever profile was there before
async fn check_profile(client: &ApiClient) -> anyhow::Result<()> {
    let (_, original) = client.get_status::<Profile>("/profile").await?;

    let first: Profile = client
        .put(Route::Public, "/profile", &json!({ "full_name": "Smoke Test", "title": "First" }))
        .await?;
    let second: Profile = client
        .put(Route::Public, "/profile", &json!({ "full_name": "Smoke Test", "title": "Second" }))
        .await?;
    ensure!(first.id == second.id, "profile id changed: {} -> {}", first.id, second.id);

    let fetched: Profile = client.get("/profile").await?;
    ensure!(fetched.fields.title == "Second", "profile not updated");

    if let Some(original) = original {
        client
            .put::<ProfileUpsert, Profile>(Route::Public, "/profile", &original.fields)
            .await?;
    }
    Ok(())
}

async fn check_projects(client: &ApiClient, route: Route) -> anyhow::Result<()> {
    let body = json!({
        "title": "Smoke X",
        "description": "created by portfolio smoke",
        "tags": ["smoke"],
        "category": "test",
        "year": 2024
    });
    let created: Project = client.post(route, "/projects", &body).await?;
    ensure!(!created.id.is_empty(), "project has no id");

    let mut changed = body.clone();
    changed["title"] = json!("Smoke Y");
    let path = format!("/projects/{}", created.id);
    let updated: Project = client.put(route, &path, &changed).await?;
    ensure!(updated.id == created.id, "update changed the id");

    let listed: Vec<Project> = client.get("/projects").await?;
    let stored = listed
        .iter()
        .find(|p| p.id == created.id)
        .ok_or_else(|| anyhow!("project missing from list"))?;
    ensure!(stored.title == "Smoke Y", "project title not updated");

    for _ in 0..2 {
        let deleted: Value = client.delete(route, &path).await?;
        ensure!(deleted["ok"] == json!(true), "delete did not return ok");
    }
    Ok(())
}

/// Replaces the skill set, then puts the original set back
async fn check_skills(client: &ApiClient, route: Route) -> anyhow::Result<()> {
    let original: Vec<SkillGroup> = client.get("/skills").await?;

    let groups = json!([
        { "group": "Smoke A", "items": [{ "name": "Rust", "level": 90 }] },
        { "group": "Smoke B", "items": [] }
    ]);
    let installed: Vec<SkillGroup> = client.put(route, "/skills", &groups).await?;
    let listed: Vec<SkillGroup> = client.get("/skills").await?;

    let result = if listed == installed && listed.len() == 2 {
        Ok(())
    } else {
        Err(anyhow!("skills list does not match the replaced set"))
    };

    client.put::<_, Vec<SkillGroup>>(route, "/skills", &original).await?;
    result
}

async fn check_blog(client: &ApiClient, route: Route) -> anyhow::Result<()> {
    let post = |title: &str, date: &str| {
        json!({ "title": title, "excerpt": "smoke", "content": "smoke", "date": date })
    };
    let older: BlogPost = client.post(route, "/blog", &post("Smoke old", "1999-01-01")).await?;
    let newer: BlogPost = client.post(route, "/blog", &post("Smoke new", "1999-06-01")).await?;

    let result: anyhow::Result<()> = async {
        let listed: Vec<BlogPost> = client.get("/blog").await?;
        let position = |id: &str| listed.iter().position(|p| p.id == id);
        match (position(&newer.id), position(&older.id)) {
            (Some(n), Some(o)) => ensure!(n < o, "blog list not newest first"),
            _ => return Err(anyhow!("blog posts missing from list")),
        }

        let fetched: BlogPost = client.get(&format!("/blog/{}", older.id)).await?;
        ensure!(fetched.title == "Smoke old", "fetched wrong blog post");

        let (status, _) = client.get_status::<Value>("/blog/does-not-exist").await?;
        ensure!(status == StatusCode::NOT_FOUND, "missing post returned {}", status);
        Ok(())
    }
    .await;

    for id in [&older.id, &newer.id] {
        client.delete::<Value>(route, &format!("/blog/{}", id)).await?;
    }
    result
}

async fn check_contact(client: &ApiClient) -> anyhow::Result<()> {
    let receipt: Value = client
        .post(
            Route::Public,
            "/contact",
            &json!({ "name": "Smoke", "email": "smoke@example.com", "message": "portfolio smoke check" }),
        )
        .await?;
    ensure!(receipt["ok"] == json!(true), "contact not accepted");
    ensure!(receipt["email"]["sent"].is_boolean(), "contact receipt has no email outcome");
    Ok(())
}
