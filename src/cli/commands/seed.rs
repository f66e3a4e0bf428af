use anyhow::Context;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::Path;

use crate::cli::client::{ApiClient, Route};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::database::models::{BlogPost, Profile, ProfileUpsert, Project, SkillGroup};

/// Initial content for an empty site. JSON files parse as well, YAML being a superset.
#[derive(Debug, Default, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub profile: Option<ProfileUpsert>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skills: Vec<SkillGroup>,
    #[serde(default)]
    pub blog: Vec<BlogPost>,
}

pub fn parse_seed(content: &str) -> anyhow::Result<SeedFile> {
    serde_yaml::from_str(content).context("invalid seed file")
}

pub async fn handle(client: &ApiClient, file: &Path, output_format: OutputFormat) -> anyhow::Result<()> {
    let content = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;
    let seed = parse_seed(&content)?;

    // Collection writes go through the admin routes when a token is available
    let route = if client.has_admin_token() { Route::Admin } else { Route::Public };
    let mut summary = serde_json::Map::new();

    if let Some(profile) = seed.profile {
        let (status, _) = client.get_status::<Profile>("/profile").await?;
        let action = if status == StatusCode::NOT_FOUND {
            client.put::<_, Profile>(Route::Public, "/profile", &profile).await?;
            "created"
        } else {
            "skipped"
        };
        summary.insert("profile".into(), json!(action));
    }

    let existing: Vec<Project> = client.get("/projects").await?;
    let count = if existing.is_empty() {
        for project in &seed.projects {
            client.post::<_, Project>(route, "/projects", project).await?;
        }
        seed.projects.len()
    } else {
        0
    };
    summary.insert("projects".into(), json!(count));

    let existing: Vec<SkillGroup> = client.get("/skills").await?;
    let count = if existing.is_empty() && !seed.skills.is_empty() {
        client.put::<_, Vec<SkillGroup>>(route, "/skills", &seed.skills).await?.len()
    } else {
        0
    };
    summary.insert("skills".into(), json!(count));

    let existing: Vec<BlogPost> = client.get("/blog").await?;
    let count = if existing.is_empty() {
        for post in &seed.blog {
            client.post::<_, BlogPost>(route, "/blog", post).await?;
        }
        seed.blog.len()
    } else {
        0
    };
    summary.insert("blog".into(), json!(count));

    output_success(
        output_format,
        &format!("Seeded {} from {}", client.base_url(), file.display()),
        Some(Value::Object(summary)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_yaml_seed_with_defaults() {
        let seed = parse_seed(
            r#"
profile:
  full_name: Ada Lovelace
  title: Engineer
projects:
  - title: Analytical Engine
    description: Mechanical computer
    category: hardware
    year: 1837
skills:
  - group: Languages
    items:
      - name: Rust
        level: 90
"#,
        )
        .unwrap();

        let profile = seed.profile.unwrap();
        assert!(profile.availability);
        assert_eq!(seed.projects.len(), 1);
        assert!(seed.projects[0].tags.is_empty());
        assert!(!seed.projects[0].id.is_empty());
        assert_eq!(seed.skills[0].items[0].level, 90);
        assert!(seed.blog.is_empty());
    }

    #[test]
    fn parses_json_seed() {
        let seed = parse_seed(r#"{"blog": [{"title": "t", "excerpt": "e", "content": "c", "date": "2024-01-01"}]}"#).unwrap();
        assert!(seed.profile.is_none());
        assert_eq!(seed.blog[0].likes, 0);
    }

    #[test]
    fn rejects_ill_typed_seed() {
        assert!(parse_seed("projects:\n  - title: x\n    year: soon\n").is_err());
    }
}
