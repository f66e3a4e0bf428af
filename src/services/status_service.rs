use std::sync::Arc;

use crate::database::models::{StatusCheck, StatusCheckCreate};
use crate::database::{DatabaseError, RecordStore, Repository};
use crate::filter::FilterData;

pub const STATUS_COLLECTION: &str = "status_checks";

#[derive(Clone)]
pub struct StatusService {
    repo: Repository<StatusCheck>,
}

impl StatusService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            repo: Repository::new(STATUS_COLLECTION, store),
        }
    }

    pub async fn create(&self, input: StatusCheckCreate) -> Result<StatusCheck, DatabaseError> {
        let check = StatusCheck::new(input);
        self.repo.insert_one(&check).await?;
        Ok(check)
    }

    pub async fn list(&self) -> Result<Vec<StatusCheck>, DatabaseError> {
        self.repo.select_any(FilterData::all()).await
    }
}
