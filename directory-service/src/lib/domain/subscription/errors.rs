use thiserror::Error;

/// Error for SubscriptionId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubscriptionIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for contact parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("Contact must not be empty")]
    Empty,
}

/// Error for a single notification delivery attempt.
///
/// Deliveries are fire-and-forget: these are logged by the service and never
/// surfaced to the request that triggered the fan-out.
#[derive(Debug, Clone, Error)]
pub enum NotifyError {
    #[error("Email delivery failed: {0}")]
    EmailFailed(String),

    #[error("Webhook delivery failed: {0}")]
    WebhookFailed(String),
}

/// Top-level error for subscription operations
#[derive(Debug, Clone, Error)]
pub enum SubscriptionError {
    #[error("Invalid subscription ID: {0}")]
    InvalidSubscriptionId(#[from] SubscriptionIdError),

    #[error("Invalid contact: {0}")]
    InvalidContact(#[from] ContactError),

    #[error("Subscription not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
