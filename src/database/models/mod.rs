pub mod blog;
pub mod contact;
pub mod profile;
pub mod project;
pub mod skill;
pub mod status;

pub use blog::BlogPost;
pub use contact::{ContactCreate, ContactMessage};
pub use profile::{Links, Profile, ProfileUpsert};
pub use project::Project;
pub use skill::{SkillGroup, SkillItem};
pub use status::{StatusCheck, StatusCheckCreate};

/// Fresh opaque identifier for a new entity
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Current time at the precision the stored timestamps carry
pub fn now_micros() -> chrono::DateTime<chrono::Utc> {
    use chrono::SubsecRound;
    chrono::Utc::now().trunc_subsecs(6)
}

/// RFC 3339 with a fixed six-digit fraction, so stored timestamps sort as strings.
pub mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Micros, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
