use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{new_id, now_micros};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactCreate {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(with = "super::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl ContactMessage {
    pub fn new(input: ContactCreate) -> Self {
        Self {
            id: new_id(),
            name: input.name,
            email: input.email,
            message: input.message,
            created_at: now_micros(),
        }
    }
}
