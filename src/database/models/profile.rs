use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub resume: Option<String>,
}

/// PUT /api/profile payload; the id is never client-controlled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpsert {
    pub full_name: String,
    pub title: String,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub university: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default = "default_availability")]
    pub availability: bool,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub links: Links,
}

/// The singleton profile document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(flatten)]
    pub fields: ProfileUpsert,
}

impl Profile {
    pub fn new(id: String, fields: ProfileUpsert) -> Self {
        Self { id, fields }
    }
}

fn default_availability() -> bool {
    true
}
