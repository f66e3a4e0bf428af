use async_trait::async_trait;
use futures::TryStreamExt;
use serde_json::Value;
use sqlx::postgres::{PgArguments, PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Row, Transaction};
use std::time::Duration;
use tracing::info;

use super::store::{DatabaseError, Document, RecordStore, WriteResult};
use crate::config::StorageConfig;
use crate::filter::{Filter, FilterData};

pub const DOCUMENTS_TABLE: &str = "documents";

const CREATE_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS documents (
        row_id BIGSERIAL PRIMARY KEY,
        collection TEXT NOT NULL,
        body JSONB NOT NULL
    )
"#;

const CREATE_INDEX_SQL: &str =
    "CREATE INDEX IF NOT EXISTS documents_collection_idx ON documents (collection, row_id)";

const INSERT_SQL: &str = "INSERT INTO documents (collection, body) VALUES ($1, $2)";

// Keeps array order so row_id reflects submission order
const INSERT_MANY_SQL: &str = r#"
    INSERT INTO documents (collection, body)
    SELECT $1, e.value
    FROM jsonb_array_elements($2) WITH ORDINALITY AS e(value, ord)
    ORDER BY e.ord
"#;

/// JSONB document store on PostgreSQL. Every collection shares the
/// `documents` table; `row_id` stays internal.
pub struct PgRecordStore {
    pool: PgPool,
    max_limit: i32,
}

impl PgRecordStore {
    pub async fn connect(connection_string: &str, config: &StorageConfig) -> Result<Self, DatabaseError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(connection_string)
            .await?;

        let store = Self::from_pool(pool, config.list_limit);
        store.ensure_schema().await?;
        Ok(store)
    }

    pub fn from_pool(pool: PgPool, max_limit: i32) -> Self {
        Self { pool, max_limit }
    }

    pub async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        sqlx::query(CREATE_TABLE_SQL).execute(&self.pool).await?;
        sqlx::query(CREATE_INDEX_SQL).execute(&self.pool).await?;
        Ok(())
    }

    fn filter(&self, collection: &str, data: FilterData) -> Result<Filter, DatabaseError> {
        Ok(Filter::new(collection)?.max_limit(self.max_limit).assign(data)?)
    }

    /// Serializes writers of one collection until the transaction ends
    async fn lock_collection(tx: &mut Transaction<'_, Postgres>, collection: &str) -> Result<(), DatabaseError> {
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(collection)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn get_one(&self, collection: &str, filter: FilterData) -> Result<Option<Document>, DatabaseError> {
        let filter = self.filter(collection, FilterData { limit: Some(1), ..filter })?;
        let sql = filter.to_sql(DOCUMENTS_TABLE)?;

        let q = bind_params(sqlx::query(&sql.query).bind(collection), &sql.params);
        match q.fetch_optional(&self.pool).await? {
            Some(row) => Ok(Some(decode_body(&row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self, collection: &str, filter: FilterData) -> Result<Vec<Document>, DatabaseError> {
        let filter = self.filter(collection, filter)?;
        let sql = filter.to_sql(DOCUMENTS_TABLE)?;

        let q = bind_params(sqlx::query(&sql.query).bind(collection), &sql.params);
        q.fetch(&self.pool)
            .map_err(DatabaseError::from)
            .and_then(|row| futures::future::ready(decode_body(&row)))
            .try_collect()
            .await
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<(), DatabaseError> {
        Filter::validate_collection_name(collection)?;
        sqlx::query(INSERT_SQL)
            .bind(collection)
            .bind(Json(&document))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn insert_many(&self, collection: &str, documents: Vec<Document>) -> Result<(), DatabaseError> {
        Filter::validate_collection_name(collection)?;
        if documents.is_empty() {
            return Ok(());
        }
        sqlx::query(INSERT_MANY_SQL)
            .bind(collection)
            .bind(Json(&documents))
            .execute(&self.pool)
            .await?;
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
        let where_sql = filter.to_where_sql(2)?;
        let sql = format!(
            "UPDATE documents SET body = body || $2 WHERE row_id = \
             (SELECT row_id FROM documents WHERE collection = $1 AND ({}) ORDER BY row_id LIMIT 1)",
            where_sql.query
        );

        let mut tx = self.pool.begin().await?;
        if upsert {
            Self::lock_collection(&mut tx, collection).await?;
        }

        let q = bind_params(
            sqlx::query(&sql).bind(collection).bind(Json(&document)),
            &where_sql.params,
        );
        let affected = q.execute(&mut *tx).await?.rows_affected();

        let upserted = if affected == 0 && upsert {
            sqlx::query(INSERT_SQL)
                .bind(collection)
                .bind(Json(&document))
                .execute(&mut *tx)
                .await?;
            true
        } else {
            false
        };

        tx.commit().await?;
        Ok(WriteResult { affected, upserted })
    }

    async fn delete(&self, collection: &str, filter: FilterData) -> Result<WriteResult, DatabaseError> {
        let filter = self.filter(collection, filter)?;
        let where_sql = filter.to_where_sql(1)?;
        let sql = format!(
            "DELETE FROM documents WHERE row_id = \
             (SELECT row_id FROM documents WHERE collection = $1 AND ({}) ORDER BY row_id LIMIT 1)",
            where_sql.query
        );

        let q = bind_params(sqlx::query(&sql).bind(collection), &where_sql.params);
        let affected = q.execute(&self.pool).await?.rows_affected();
        Ok(WriteResult { affected, upserted: false })
    }

    async fn delete_many(&self, collection: &str, filter: FilterData) -> Result<WriteResult, DatabaseError> {
        let filter = self.filter(collection, filter)?;
        let where_sql = filter.to_where_sql(1)?;
        let sql = format!(
            "DELETE FROM documents WHERE collection = $1 AND ({})",
            where_sql.query
        );

        let q = bind_params(sqlx::query(&sql).bind(collection), &where_sql.params);
        let affected = q.execute(&self.pool).await?.rows_affected();
        Ok(WriteResult { affected, upserted: false })
    }

    async fn replace_all(&self, collection: &str, documents: Vec<Document>) -> Result<(), DatabaseError> {
        Filter::validate_collection_name(collection)?;

        let mut tx = self.pool.begin().await?;
        Self::lock_collection(&mut tx, collection).await?;

        sqlx::query("DELETE FROM documents WHERE collection = $1")
            .bind(collection)
            .execute(&mut *tx)
            .await?;

        if !documents.is_empty() {
            sqlx::query(INSERT_MANY_SQL)
                .bind(collection)
                .bind(Json(&documents))
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}

fn decode_body(row: &PgRow) -> Result<Document, DatabaseError> {
    let Json(body) = row.try_get::<Json<Document>, _>("body")?;
    Ok(body)
}

/// Filter parameters are always bound as JSONB
fn bind_params<'q>(
    mut q: sqlx::query::Query<'q, Postgres, PgArguments>,
    params: &'q [Value],
) -> sqlx::query::Query<'q, Postgres, PgArguments> {
    for p in params {
        q = q.bind(Json(p));
    }
    q
}
