use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::resource::errors::ResourceError;
use crate::resource::models::DocumentId;
use crate::resource::models::ResourceInput;
use crate::resource::models::ResourceRecord;

/// Port for the generic resource service, one instance per domain.
#[async_trait]
pub trait ResourceServicePort: Send + Sync + 'static {
    /// Validate and persist a new record, returning it with its assigned id.
    ///
    /// # Errors
    /// * `UnknownField` / `MissingField` - Input fails the domain schema
    /// * `DatabaseError` - Store operation failed
    async fn add(&self, input: ResourceInput) -> Result<ResourceRecord, ResourceError>;

    /// Fetch every record in the domain collection.
    ///
    /// An empty collection is an empty list, never an error.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn get_all(&self) -> Result<Vec<ResourceRecord>, ResourceError>;

    /// Validate and wholesale-replace an existing record's fields.
    ///
    /// The input must carry the reserved `id` key and, exactly as on add,
    /// every required field.
    ///
    /// # Errors
    /// * `MissingId` - No id in the input
    /// * `UnknownField` / `MissingField` - Input fails the domain schema
    /// * `NotFound` - No record with this id
    /// * `DatabaseError` - Store operation failed
    async fn update(&self, input: ResourceInput) -> Result<ResourceRecord, ResourceError>;

    /// Remove a record by id.
    ///
    /// # Errors
    /// * `NotFound` - No record with this id
    /// * `DatabaseError` - Store operation failed
    async fn delete(&self, id: &DocumentId) -> Result<(), ResourceError>;
}

/// Generic key-value document CRUD against named collections.
///
/// The single persistence seam shared by every domain instance.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Insert a field map, returning the stored record with its assigned id.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn insert(
        &self,
        collection: &str,
        fields: &BTreeMap<String, String>,
    ) -> Result<ResourceRecord, ResourceError>;

    /// Fetch all records in a collection.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_all(&self, collection: &str) -> Result<Vec<ResourceRecord>, ResourceError>;

    /// Fetch one record by id (None if not found).
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_id(
        &self,
        collection: &str,
        id: &DocumentId,
    ) -> Result<Option<ResourceRecord>, ResourceError>;

    /// Replace a record's fields wholesale.
    ///
    /// # Errors
    /// * `NotFound` - No record with this id in the collection
    /// * `DatabaseError` - Store operation failed
    async fn replace(
        &self,
        collection: &str,
        id: &DocumentId,
        fields: &BTreeMap<String, String>,
    ) -> Result<(), ResourceError>;

    /// Remove a record by id.
    ///
    /// # Errors
    /// * `NotFound` - No record with this id in the collection
    /// * `DatabaseError` - Store operation failed
    async fn delete(&self, collection: &str, id: &DocumentId) -> Result<(), ResourceError>;
}
