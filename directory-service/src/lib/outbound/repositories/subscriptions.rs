use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::subscription::errors::SubscriptionError;
use crate::subscription::models::Contact;
use crate::subscription::models::Subscription;
use crate::subscription::models::SubscriptionId;
use crate::subscription::ports::SubscriptionRepository;

pub struct PostgresSubscriptionRepository {
    pool: PgPool,
}

impl PostgresSubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn subscription_from_row(row: &PgRow) -> Result<Subscription, SubscriptionError> {
    let id: Uuid = row
        .try_get("id")
        .map_err(|e| SubscriptionError::DatabaseError(e.to_string()))?;
    let resource: String = row
        .try_get("resource")
        .map_err(|e| SubscriptionError::DatabaseError(e.to_string()))?;
    let city: String = row
        .try_get("city")
        .map_err(|e| SubscriptionError::DatabaseError(e.to_string()))?;
    let contact: String = row
        .try_get("contact")
        .map_err(|e| SubscriptionError::DatabaseError(e.to_string()))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| SubscriptionError::DatabaseError(e.to_string()))?;

    Ok(Subscription {
        id: SubscriptionId(id),
        resource,
        city,
        contact: Contact::parse(&contact)?,
        created_at,
    })
}

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
    async fn create(
        &self,
        subscription: Subscription,
    ) -> Result<Subscription, SubscriptionError> {
        sqlx::query(
            r#"
            INSERT INTO subscriptions (id, resource, city, contact, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(subscription.id.0)
        .bind(&subscription.resource)
        .bind(&subscription.city)
        .bind(subscription.contact.as_str())
        .bind(subscription.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| SubscriptionError::DatabaseError(e.to_string()))?;

        Ok(subscription)
    }

    async fn find_by_interest(
        &self,
        resource: &str,
        city: &str,
    ) -> Result<Vec<Subscription>, SubscriptionError> {
        let rows = sqlx::query(
            r#"
            SELECT id, resource, city, contact, created_at
            FROM subscriptions
            WHERE resource = $1 AND city = $2
            ORDER BY created_at
            "#,
        )
        .bind(resource)
        .bind(city)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| SubscriptionError::DatabaseError(e.to_string()))?;

        rows.iter().map(subscription_from_row).collect()
    }

    async fn delete(&self, id: &SubscriptionId) -> Result<(), SubscriptionError> {
        let result = sqlx::query(
            r#"
            DELETE FROM subscriptions
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| SubscriptionError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(SubscriptionError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
