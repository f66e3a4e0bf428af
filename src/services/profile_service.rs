use std::sync::Arc;

use crate::database::models::{new_id, Profile, ProfileUpsert};
use crate::database::{DatabaseError, RecordStore, Repository};
use crate::filter::FilterData;

pub const PROFILE_COLLECTION: &str = "profile";

/// The single site-owner profile
#[derive(Clone)]
pub struct ProfileService {
    repo: Repository<Profile>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            repo: Repository::new(PROFILE_COLLECTION, store),
        }
    }

    pub async fn get(&self) -> Result<Profile, DatabaseError> {
        self.repo.select_404(FilterData::all(), "Profile not found").await
    }

    /// Replace every field, keeping the existing id when there is one.
    pub async fn upsert(&self, payload: ProfileUpsert) -> Result<Profile, DatabaseError> {
        let id = match self.repo.select_one(FilterData::all()).await? {
            Some(existing) => existing.id,
            None => new_id(),
        };

        let profile = Profile::new(id, payload);
        let result = self.repo.update_one(FilterData::all(), &profile, true).await?;
        if result.upserted {
            tracing::info!("Created profile {}", profile.id);
        }

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::memory_store;
    use serde_json::json;

    fn payload(title: &str) -> ProfileUpsert {
        serde_json::from_value(json!({ "full_name": "Ada Lovelace", "title": title })).unwrap()
    }

    #[tokio::test]
    async fn get_without_profile_is_not_found() {
        let service = ProfileService::new(memory_store());
        let err = service.get().await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound(ref m) if m == "Profile not found"));
    }

    #[tokio::test]
    async fn repeated_upserts_keep_one_id() {
        let store = memory_store();
        let service = ProfileService::new(store.clone());

        let first = service.upsert(payload("Engineer")).await.unwrap();
        let second = service.upsert(payload("Mathematician")).await.unwrap();
        assert_eq!(first.id, second.id);

        let fetched = service.get().await.unwrap();
        assert_eq!(fetched, second);
        assert_eq!(fetched.fields.title, "Mathematician");

        let all = store.list(PROFILE_COLLECTION, FilterData::all()).await.unwrap();
        assert_eq!(all.len(), 1);
    }
}
