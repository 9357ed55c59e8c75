use std::sync::Arc;

use async_trait::async_trait;

use crate::resource::errors::ResourceError;
use crate::resource::models::DocumentId;
use crate::resource::models::ResourceInput;
use crate::resource::models::ResourceRecord;
use crate::resource::models::ResourceSchema;
use crate::resource::ports::DocumentStore;
use crate::resource::ports::ResourceServicePort;

/// Schema-parameterized resource service.
///
/// One construction per domain; the schema supplies the collection name and
/// the required field set, the store supplies persistence. The add and update
/// paths share the same validation.
pub struct ResourceService<DS>
where
    DS: DocumentStore,
{
    schema: ResourceSchema,
    store: Arc<DS>,
}

impl<DS> ResourceService<DS>
where
    DS: DocumentStore,
{
    /// Create a service instance for one domain schema.
    pub fn new(schema: ResourceSchema, store: Arc<DS>) -> Self {
        Self { schema, store }
    }

    pub fn schema(&self) -> &ResourceSchema {
        &self.schema
    }
}

#[async_trait]
impl<DS> ResourceServicePort for ResourceService<DS>
where
    DS: DocumentStore,
{
    async fn add(&self, input: ResourceInput) -> Result<ResourceRecord, ResourceError> {
        // A provided id is ignored on add; the store assigns one.
        self.schema.validate(&input.fields)?;

        let record = self
            .store
            .insert(self.schema.collection, &input.fields)
            .await?;

        tracing::info!(
            domain = self.schema.domain,
            record_id = %record.id,
            "Resource added"
        );

        Ok(record)
    }

    async fn get_all(&self) -> Result<Vec<ResourceRecord>, ResourceError> {
        self.store.find_all(self.schema.collection).await
    }

    async fn update(&self, input: ResourceInput) -> Result<ResourceRecord, ResourceError> {
        let id = input.id.as_deref().ok_or(ResourceError::MissingId)?;
        let id = DocumentId::from_string(id)?;

        self.schema.validate(&input.fields)?;

        self.store
            .replace(self.schema.collection, &id, &input.fields)
            .await?;

        Ok(ResourceRecord {
            id,
            fields: input.fields,
        })
    }

    async fn delete(&self, id: &DocumentId) -> Result<(), ResourceError> {
        self.store.delete(self.schema.collection, id).await
    }
}
