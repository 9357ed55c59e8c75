use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use crate::subscription::errors::SubscriptionError;
use crate::subscription::models::Contact;
use crate::subscription::models::SubscribeCommand;
use crate::subscription::models::Subscription;
use crate::subscription::models::SubscriptionId;
use crate::subscription::ports::NotificationSink;
use crate::subscription::ports::SubscriptionRepository;
use crate::subscription::ports::SubscriptionServicePort;

/// Domain service for subscriber registration and notification fan-out.
pub struct SubscriptionService<SR, NS>
where
    SR: SubscriptionRepository,
    NS: NotificationSink,
{
    repository: Arc<SR>,
    sink: Arc<NS>,
}

impl<SR, NS> SubscriptionService<SR, NS>
where
    SR: SubscriptionRepository,
    NS: NotificationSink,
{
    /// Create a new subscription service with injected dependencies.
    pub fn new(repository: Arc<SR>, sink: Arc<NS>) -> Self {
        Self { repository, sink }
    }
}

#[async_trait]
impl<SR, NS> SubscriptionServicePort for SubscriptionService<SR, NS>
where
    SR: SubscriptionRepository,
    NS: NotificationSink,
{
    async fn subscribe(
        &self,
        command: SubscribeCommand,
    ) -> Result<Subscription, SubscriptionError> {
        let subscription = Subscription {
            id: SubscriptionId::new(),
            resource: command.resource,
            city: command.city,
            contact: command.contact,
            created_at: Utc::now(),
        };

        let subscription = self.repository.create(subscription).await?;

        tracing::info!(
            subscription_id = %subscription.id,
            resource = %subscription.resource,
            city = %subscription.city,
            "Subscriber registered"
        );

        Ok(subscription)
    }

    async fn unsubscribe(&self, id: &SubscriptionId) -> Result<(), SubscriptionError> {
        self.repository.delete(id).await
    }

    async fn list_subscribers(
        &self,
        resource: &str,
        city: &str,
    ) -> Result<HashMap<SubscriptionId, String>, SubscriptionError> {
        let subscriptions = self.repository.find_by_interest(resource, city).await?;

        Ok(subscriptions
            .into_iter()
            .map(|s| (s.id, s.contact.as_str().to_string()))
            .collect())
    }

    async fn notify(&self, resource: &str, city: &str) -> Result<(), SubscriptionError> {
        let subscribers = self.repository.find_by_interest(resource, city).await?;

        if subscribers.is_empty() {
            return Ok(());
        }

        let message = format!("A new {} resource is available in {}", resource, city);
        let payload = json!({
            "resource": resource,
            "city": city,
            "message": message,
        });

        // Sequential fan-out; each sink call is bounded by the configured
        // delivery timeout. Failures are logged and dropped.
        for subscriber in subscribers {
            let delivery = match &subscriber.contact {
                Contact::Email(address) => {
                    self.sink
                        .send_email(address, "New resource available", &message)
                        .await
                }
                Contact::Webhook(url) => self.sink.post_webhook(url, &payload).await,
            };

            if let Err(e) = delivery {
                tracing::warn!(
                    subscription_id = %subscriber.id,
                    contact = %subscriber.contact,
                    error = %e,
                    "Notification delivery failed"
                );
            }
        }

        Ok(())
    }
}
