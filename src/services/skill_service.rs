use std::sync::Arc;

use crate::database::models::SkillGroup;
use crate::database::{DatabaseError, RecordStore, Repository};
use crate::filter::FilterData;

pub const SKILL_COLLECTION: &str = "skills";

#[derive(Clone)]
pub struct SkillService {
    repo: Repository<SkillGroup>,
}

impl SkillService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            repo: Repository::new(SKILL_COLLECTION, store),
        }
    }

    pub async fn list(&self) -> Result<Vec<SkillGroup>, DatabaseError> {
        self.repo.select_any(FilterData::all()).await
    }

    /// Discard every stored group and install `groups` in their given order.
    pub async fn replace_all(&self, groups: Vec<SkillGroup>) -> Result<Vec<SkillGroup>, DatabaseError> {
        self.repo.replace_all(&groups).await?;
        tracing::debug!("Replaced skills with {} groups", groups.len());
        Ok(groups)
    }
}
