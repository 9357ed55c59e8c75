use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::subscription::errors::NotifyError;
use crate::subscription::errors::SubscriptionError;
use crate::subscription::models::SubscribeCommand;
use crate::subscription::models::Subscription;
use crate::subscription::models::SubscriptionId;

/// Port for subscription domain service operations.
#[async_trait]
pub trait SubscriptionServicePort: Send + Sync + 'static {
    /// Persist a new subscriber interest tuple.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn subscribe(&self, command: SubscribeCommand)
        -> Result<Subscription, SubscriptionError>;

    /// Remove a subscription by id.
    ///
    /// # Errors
    /// * `NotFound` - No subscription with this id
    /// * `DatabaseError` - Store operation failed
    async fn unsubscribe(&self, id: &SubscriptionId) -> Result<(), SubscriptionError>;

    /// List subscriber contacts for an exact resource/city pair.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn list_subscribers(
        &self,
        resource: &str,
        city: &str,
    ) -> Result<HashMap<SubscriptionId, String>, SubscriptionError>;

    /// Fan out one notification per matching subscriber.
    ///
    /// Fire-and-forget: individual delivery failures are logged and dropped,
    /// never returned. Only a failure to read the subscriber list errors.
    ///
    /// # Errors
    /// * `DatabaseError` - Subscriber lookup failed
    async fn notify(&self, resource: &str, city: &str) -> Result<(), SubscriptionError>;
}

/// Persistence operations for subscriptions.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync + 'static {
    /// Persist a new subscription.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn create(&self, subscription: Subscription)
        -> Result<Subscription, SubscriptionError>;

    /// Fetch subscriptions matching a resource/city pair exactly.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_interest(
        &self,
        resource: &str,
        city: &str,
    ) -> Result<Vec<Subscription>, SubscriptionError>;

    /// Remove a subscription by id.
    ///
    /// # Errors
    /// * `NotFound` - No subscription with this id
    /// * `DatabaseError` - Store operation failed
    async fn delete(&self, id: &SubscriptionId) -> Result<(), SubscriptionError>;
}

/// Outbound delivery sink for notifications.
///
/// Implementations bound each call with the configured timeout.
#[async_trait]
pub trait NotificationSink: Send + Sync + 'static {
    /// Deliver an email notification.
    ///
    /// # Errors
    /// * `EmailFailed` - SMTP submission failed
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), NotifyError>;

    /// POST a JSON payload to a webhook URL.
    ///
    /// # Errors
    /// * `WebhookFailed` - Request failed or returned an error status
    async fn post_webhook(&self, url: &str, payload: &Value) -> Result<(), NotifyError>;
}
