use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

use super::store::{DatabaseError, Document, RecordStore, WriteResult};
use crate::filter::FilterData;

/// Typed view of one collection: entities in, entities out.
pub struct Repository<T> {
    collection: &'static str,
    store: Arc<dyn RecordStore>,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            collection: self.collection,
            store: self.store.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T> Repository<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(collection: &'static str, store: Arc<dyn RecordStore>) -> Self {
        Self {
            collection,
            store,
            _phantom: PhantomData,
        }
    }

    pub async fn select_any(&self, filter_data: FilterData) -> Result<Vec<T>, DatabaseError> {
        self.store
            .list(self.collection, filter_data)
            .await?
            .into_iter()
            .map(from_document)
            .collect()
    }

    pub async fn select_one(&self, filter_data: FilterData) -> Result<Option<T>, DatabaseError> {
        self.store
            .get_one(self.collection, filter_data)
            .await?
            .map(from_document)
            .transpose()
    }

    pub async fn select_404(&self, filter_data: FilterData, message: &str) -> Result<T, DatabaseError> {
        self.select_one(filter_data)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(message.to_string()))
    }

    pub async fn insert_one(&self, entity: &T) -> Result<(), DatabaseError> {
        self.store.insert(self.collection, to_document(entity)?).await
    }

    pub async fn update_one(&self, filter_data: FilterData, entity: &T, upsert: bool) -> Result<WriteResult, DatabaseError> {
        self.store
            .update(self.collection, filter_data, to_document(entity)?, upsert)
            .await
    }

    pub async fn delete_one(&self, filter_data: FilterData) -> Result<WriteResult, DatabaseError> {
        self.store.delete(self.collection, filter_data).await
    }

    pub async fn replace_all(&self, entities: &[T]) -> Result<(), DatabaseError> {
        let documents = entities.iter().map(to_document).collect::<Result<Vec<_>, _>>()?;
        self.store.replace_all(self.collection, documents).await
    }
}

fn to_document<T: Serialize>(entity: &T) -> Result<Document, DatabaseError> {
    match serde_json::to_value(entity)? {
        Value::Object(map) => Ok(map),
        other => Err(DatabaseError::QueryError(format!(
            "Entities must serialize to a JSON object, got {}",
            other
        ))),
    }
}

fn from_document<T: DeserializeOwned>(document: Document) -> Result<T, DatabaseError> {
    Ok(serde_json::from_value(Value::Object(document))?)
}
