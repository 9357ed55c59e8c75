use thiserror::Error;

/// Error for DocumentId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DocumentIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all resource operations
#[derive(Debug, Clone, Error)]
pub enum ResourceError {
    #[error("Invalid document ID: {0}")]
    InvalidDocumentId(#[from] DocumentIdError),

    #[error("Unknown field: {field}")]
    UnknownField { field: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Field {field} must be a scalar value")]
    InvalidFieldValue { field: String },

    #[error("Update requires an id field")]
    MissingId,

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
