use std::sync::Arc;

use crate::database::models::BlogPost;
use crate::database::{DatabaseError, RecordStore, Repository};
use crate::filter::FilterData;

pub const BLOG_COLLECTION: &str = "blog";

#[derive(Clone)]
pub struct BlogService {
    repo: Repository<BlogPost>,
}

impl BlogService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            repo: Repository::new(BLOG_COLLECTION, store),
        }
    }

    /// Newest first by the `date` string
    pub async fn list(&self) -> Result<Vec<BlogPost>, DatabaseError> {
        self.repo.select_any(FilterData::all().order_by("date desc")).await
    }

    pub async fn get(&self, id: &str) -> Result<BlogPost, DatabaseError> {
        self.repo.select_404(FilterData::by_id(id), "Blog post not found").await
    }

    pub async fn create(&self, post: BlogPost) -> Result<BlogPost, DatabaseError> {
        self.repo.insert_one(&post).await?;
        Ok(post)
    }

    pub async fn update(&self, id: &str, mut post: BlogPost) -> Result<BlogPost, DatabaseError> {
        post.id = id.to_string();
        let result = self.repo.update_one(FilterData::by_id(id), &post, false).await?;
        if result.affected == 0 {
            tracing::debug!("Blog post {} not found, update skipped", id);
        }
        Ok(post)
    }

    pub async fn delete(&self, id: &str) -> Result<(), DatabaseError> {
        self.repo.delete_one(FilterData::by_id(id)).await?;
        Ok(())
    }
}
