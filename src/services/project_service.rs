use std::sync::Arc;

use crate::database::models::Project;
use crate::database::{DatabaseError, RecordStore, Repository};
use crate::filter::FilterData;

pub const PROJECT_COLLECTION: &str = "projects";

#[derive(Clone)]
pub struct ProjectService {
    repo: Repository<Project>,
}

impl ProjectService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            repo: Repository::new(PROJECT_COLLECTION, store),
        }
    }

    pub async fn list(&self) -> Result<Vec<Project>, DatabaseError> {
        self.repo.select_any(FilterData::all()).await
    }

    pub async fn create(&self, project: Project) -> Result<Project, DatabaseError> {
        self.repo.insert_one(&project).await?;
        Ok(project)
    }

    /// Overwrite the project stored under `id`. The path id always wins over
    /// the body. Nothing is written when the id is unknown.
    pub async fn update(&self, id: &str, mut project: Project) -> Result<Project, DatabaseError> {
        project.id = id.to_string();
        let result = self.repo.update_one(FilterData::by_id(id), &project, false).await?;
        if result.affected == 0 {
            tracing::debug!("Project {} not found, update skipped", id);
        }
        Ok(project)
    }

    pub async fn delete(&self, id: &str) -> Result<(), DatabaseError> {
        self.repo.delete_one(FilterData::by_id(id)).await?;
        Ok(())
    }
}
