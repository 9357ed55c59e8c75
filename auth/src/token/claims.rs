use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claim set embedded in every issued bearer token.
///
/// Tokens are stateless: everything a route needs to authorize a request
/// (identity, email, role, expiry) travels inside the token itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account identifier)
    pub sub: String,

    /// Account email address
    pub email: String,

    /// Role tag carried by the account at issuance time
    pub role: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Create claims for an account, expiring `validity_hours` from now.
    pub fn for_account(
        account_id: impl ToString,
        email: impl ToString,
        role: impl ToString,
        issuer: impl ToString,
        validity_hours: i64,
    ) -> Self {
        Self::issued_at(account_id, email, role, issuer, validity_hours, Utc::now())
    }

    /// Create claims with an explicit issuance instant.
    ///
    /// # Arguments
    /// * `account_id` - Account identifier (becomes `sub`)
    /// * `email` - Account email
    /// * `role` - Role tag
    /// * `issuer` - Issuer name (must match the validating service)
    /// * `validity_hours` - Hours from `issued_at` until expiry
    /// * `issued_at` - Issuance instant
    pub fn issued_at(
        account_id: impl ToString,
        email: impl ToString,
        role: impl ToString,
        issuer: impl ToString,
        validity_hours: i64,
        issued_at: DateTime<Utc>,
    ) -> Self {
        let expiration = issued_at + Duration::hours(validity_hours);

        Self {
            sub: account_id.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
            iss: issuer.to_string(),
        }
    }

    /// Check if the claim set is expired at `current_timestamp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
