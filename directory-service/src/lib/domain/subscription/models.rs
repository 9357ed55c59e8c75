use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::subscription::errors::ContactError;
use crate::subscription::errors::SubscriptionIdError;

/// Subscription unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub Uuid);

impl SubscriptionId {
    /// Generate a new random subscription ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a subscription ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, SubscriptionIdError> {
        Uuid::parse_str(s)
            .map(SubscriptionId)
            .map_err(|e| SubscriptionIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Delivery target for a subscription.
///
/// The raw contact string disambiguates on `@`: with it the contact is an
/// email address, without it a webhook URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contact {
    Email(String),
    Webhook(String),
}

impl Contact {
    /// Parse a raw contact string.
    ///
    /// # Errors
    /// * `Empty` - Blank contact
    pub fn parse(raw: &str) -> Result<Self, ContactError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ContactError::Empty);
        }

        if raw.contains('@') {
            Ok(Contact::Email(raw.to_string()))
        } else {
            Ok(Contact::Webhook(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Contact::Email(s) => s,
            Contact::Webhook(s) => s,
        }
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A subscriber's interest in one resource-type/city pair.
#[derive(Debug, Clone)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub resource: String,
    pub city: String,
    pub contact: Contact,
    pub created_at: DateTime<Utc>,
}

/// Command to create a subscription.
#[derive(Debug, Clone)]
pub struct SubscribeCommand {
    pub resource: String,
    pub city: String,
    pub contact: Contact,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_disambiguates_on_at_sign() {
        assert_eq!(
            Contact::parse("person@example.com").unwrap(),
            Contact::Email("person@example.com".to_string())
        );
        assert_eq!(
            Contact::parse("https://example.com/hook").unwrap(),
            Contact::Webhook("https://example.com/hook".to_string())
        );
    }

    #[test]
    fn test_contact_rejects_blank() {
        assert!(Contact::parse("   ").is_err());
        assert!(Contact::parse("").is_err());
    }
}
