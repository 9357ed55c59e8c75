use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::resource::errors::ResourceError;
use crate::resource::models::DocumentId;
use crate::resource::models::ResourceRecord;
use crate::resource::ports::DocumentStore;

/// Generic document store over one Postgres table.
///
/// Each row is (collection, id, fields); the flat field map lives in a JSONB
/// column, so every domain collection shares the same shape and the same
/// queries.
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn record_from_row(row: &PgRow) -> Result<ResourceRecord, ResourceError> {
    let id: Uuid = row
        .try_get("id")
        .map_err(|e| ResourceError::DatabaseError(e.to_string()))?;
    let fields: serde_json::Value = row
        .try_get("fields")
        .map_err(|e| ResourceError::DatabaseError(e.to_string()))?;

    let fields: BTreeMap<String, String> = serde_json::from_value(fields)
        .map_err(|e| ResourceError::DatabaseError(format!("Malformed fields document: {}", e)))?;

    Ok(ResourceRecord {
        id: DocumentId(id),
        fields,
    })
}

fn fields_to_json(fields: &BTreeMap<String, String>) -> Result<serde_json::Value, ResourceError> {
    serde_json::to_value(fields).map_err(|e| ResourceError::DatabaseError(e.to_string()))
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn insert(
        &self,
        collection: &str,
        fields: &BTreeMap<String, String>,
    ) -> Result<ResourceRecord, ResourceError> {
        let id = DocumentId::new();

        sqlx::query(
            r#"
            INSERT INTO documents (id, collection, fields, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id.0)
        .bind(collection)
        .bind(fields_to_json(fields)?)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| ResourceError::DatabaseError(e.to_string()))?;

        Ok(ResourceRecord {
            id,
            fields: fields.clone(),
        })
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<ResourceRecord>, ResourceError> {
        let rows = sqlx::query(
            r#"
            SELECT id, fields
            FROM documents
            WHERE collection = $1
            ORDER BY created_at
            "#,
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ResourceError::DatabaseError(e.to_string()))?;

        rows.iter().map(record_from_row).collect()
    }

    async fn find_by_id(
        &self,
        collection: &str,
        id: &DocumentId,
    ) -> Result<Option<ResourceRecord>, ResourceError> {
        let row = sqlx::query(
            r#"
            SELECT id, fields
            FROM documents
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ResourceError::DatabaseError(e.to_string()))?;

        row.as_ref().map(record_from_row).transpose()
    }

    async fn replace(
        &self,
        collection: &str,
        id: &DocumentId,
        fields: &BTreeMap<String, String>,
    ) -> Result<(), ResourceError> {
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET fields = $3
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id.0)
        .bind(fields_to_json(fields)?)
        .execute(&self.pool)
        .await
        .map_err(|e| ResourceError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ResourceError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn delete(&self, collection: &str, id: &DocumentId) -> Result<(), ResourceError> {
        let result = sqlx::query(
            r#"
            DELETE FROM documents
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| ResourceError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ResourceError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
