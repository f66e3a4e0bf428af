use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{new_id, now_micros};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCheckCreate {
    pub client_name: String,
}

/// Diagnostic heartbeat record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: String,
    pub client_name: String,
    #[serde(with = "super::timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl StatusCheck {
    pub fn new(input: StatusCheckCreate) -> Self {
        Self {
            id: new_id(),
            client_name: input.client_name,
            timestamp: now_micros(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_round_trips_through_stored_string() {
        let check = StatusCheck::new(StatusCheckCreate { client_name: "uptime-monitor".into() });
        let stored = serde_json::to_value(&check).unwrap();
        assert!(stored["timestamp"].is_string());

        let restored: StatusCheck = serde_json::from_value(stored).unwrap();
        assert_eq!(restored.timestamp, check.timestamp);
    }
}
