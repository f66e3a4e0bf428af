use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::store::{DatabaseError, Document, RecordStore, WriteResult};
use crate::filter::{Filter, FilterData, FilterMatch, FilterOrder};

#[derive(Debug, Clone)]
struct StoredDocument {
    row_id: u64,
    body: Document,
}

#[derive(Debug, Default)]
struct Collections {
    next_row_id: u64,
    by_name: HashMap<String, Vec<StoredDocument>>,
}

impl Collections {
    fn push(&mut self, collection: &str, body: Document) {
        self.next_row_id += 1;
        let row_id = self.next_row_id;
        self.by_name
            .entry(collection.to_string())
            .or_default()
            .push(StoredDocument { row_id, body });
    }

    fn position(&self, filter: &Filter) -> Result<Option<usize>, DatabaseError> {
        let Some(docs) = self.by_name.get(filter.collection()) else {
            return Ok(None);
        };
        for (idx, doc) in docs.iter().enumerate() {
            if FilterMatch::matches(&doc.body, filter.where_data())? {
                return Ok(Some(idx));
            }
        }
        Ok(None)
    }
}

/// Process-local record store. Each operation holds the lock for its whole
/// duration, so multi-step writes are atomic with respect to other requests.
#[derive(Debug)]
pub struct MemoryRecordStore {
    inner: RwLock<Collections>,
    max_limit: i32,
}

impl MemoryRecordStore {
    pub fn new(max_limit: i32) -> Self {
        Self {
            inner: RwLock::new(Collections::default()),
            max_limit,
        }
    }

    fn filter(&self, collection: &str, data: FilterData) -> Result<Filter, DatabaseError> {
        Ok(Filter::new(collection)?.max_limit(self.max_limit).assign(data)?)
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn get_one(&self, collection: &str, filter: FilterData) -> Result<Option<Document>, DatabaseError> {
        let filter = self.filter(collection, filter)?;
        let inner = self.inner.read().await;
        Ok(inner
            .position(&filter)?
            .and_then(|idx| inner.by_name.get(collection).map(|docs| docs[idx].body.clone())))
    }

    async fn list(&self, collection: &str, filter: FilterData) -> Result<Vec<Document>, DatabaseError> {
        let filter = self.filter(collection, filter)?;
        let inner = self.inner.read().await;
        let Some(docs) = inner.by_name.get(collection) else {
            return Ok(vec![]);
        };

        let mut matched = Vec::new();
        for doc in docs {
            if FilterMatch::matches(&doc.body, filter.where_data())? {
                matched.push(doc);
            }
        }
        matched.sort_by(|a, b| {
            FilterOrder::compare(&a.body, &b.body, filter.order_data()).then(a.row_id.cmp(&b.row_id))
        });

        let offset = filter.offset_value().unwrap_or(0).max(0) as usize;
        let limit = filter.limit_value().map(|l| l.max(0) as usize).unwrap_or(usize::MAX);
        Ok(matched
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|doc| doc.body.clone())
            .collect())
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<(), DatabaseError> {
        Filter::validate_collection_name(collection)?;
        self.inner.write().await.push(collection, document);
        Ok(())
    }

    async fn insert_many(&self, collection: &str, documents: Vec<Document>) -> Result<(), DatabaseError> {
        Filter::validate_collection_name(collection)?;
        let mut inner = self.inner.write().await;
        for document in documents {
            inner.push(collection, document);
        }
        Ok(())
    }

    async fn update(
        &self,
        collection: &str,
        filter: FilterData,
        document: Document,
        upsert: bool,
    ) -> Result<WriteResult, DatabaseError> {
        let filter = self.filter(collection, filter)?;
        let mut inner = self.inner.write().await;

        match inner.position(&filter)? {
            Some(idx) => {
                if let Some(docs) = inner.by_name.get_mut(collection) {
                    docs[idx].body.extend(document);
                }
                Ok(WriteResult { affected: 1, upserted: false })
            }
            None if upsert => {
                inner.push(collection, document);
                Ok(WriteResult { affected: 0, upserted: true })
            }
            None => Ok(WriteResult::default()),
        }
    }

    async fn delete(&self, collection: &str, filter: FilterData) -> Result<WriteResult, DatabaseError> {
        let filter = self.filter(collection, filter)?;
        let mut inner = self.inner.write().await;

        match inner.position(&filter)? {
            Some(idx) => {
                if let Some(docs) = inner.by_name.get_mut(collection) {
                    docs.remove(idx);
                }
                Ok(WriteResult { affected: 1, upserted: false })
            }
            None => Ok(WriteResult::default()),
        }
    }

    async fn delete_many(&self, collection: &str, filter: FilterData) -> Result<WriteResult, DatabaseError> {
        let filter = self.filter(collection, filter)?;
        let mut inner = self.inner.write().await;
        let Some(docs) = inner.by_name.get_mut(collection) else {
            return Ok(WriteResult::default());
        };

        // Match first, then mutate
        let mut doomed = Vec::with_capacity(docs.len());
        for doc in docs.iter() {
            doomed.push(FilterMatch::matches(&doc.body, filter.where_data())?);
        }
        let removed = doomed.iter().filter(|d| **d).count() as u64;
        let mut flags = doomed.into_iter();
        docs.retain(|_| !flags.next().unwrap_or(false));
        Ok(WriteResult { affected: removed, upserted: false })
    }

    async fn replace_all(&self, collection: &str, documents: Vec<Document>) -> Result<(), DatabaseError> {
        Filter::validate_collection_name(collection)?;
        let mut inner = self.inner.write().await;
        inner.by_name.remove(collection);
        for document in documents {
            inner.push(collection, document);
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn close(&self) {
        let mut inner = self.inner.write().await;
        tracing::info!("Closed memory store ({} collections)", inner.by_name.len());
        inner.by_name.clear();
    }
}
