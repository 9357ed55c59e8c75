use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

const DEFAULT_VALIDITY_HOURS: i64 = 24;

/// Issues and validates signed bearer tokens.
///
/// Uses HS256 (HMAC with SHA-256) with a process-wide symmetric secret loaded
/// from configuration at startup. Validation checks signature, issuer, and
/// expiry; a token that fails any check is simply invalid — validation never
/// surfaces an error to the caller.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    issuer: String,
    validity_hours: i64,
}

impl TokenService {
    /// Create a new token service with a secret key and issuer name.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    /// * `issuer` - Issuer claim stamped into and required from every token
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in configuration or secure vaults, never in code
    pub fn new(secret: &[u8], issuer: impl Into<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            issuer: issuer.into(),
            validity_hours: DEFAULT_VALIDITY_HOURS,
        }
    }

    /// Override the default 24-hour validity window.
    pub fn with_validity_hours(mut self, hours: i64) -> Self {
        self.validity_hours = hours;
        self
    }

    /// Issue a token for an account.
    ///
    /// Embeds sub, email, role, iat, exp (iat + validity window), and iss.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, account_id: &str, email: &str, role: &str) -> Result<String, TokenError> {
        let claims = Claims::for_account(account_id, email, role, &self.issuer, self.validity_hours);
        self.encode(&claims)
    }

    /// Sign an explicit claim set.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Check whether a token is currently valid.
    ///
    /// Returns false on any signature, issuer, expiry, or format failure.
    pub fn verify(&self, token: &str) -> bool {
        self.decode(token).is_some()
    }

    /// Decode and validate a token, returning its claims.
    ///
    /// Returns None on any failure: bad signature, wrong issuer, expired,
    /// or malformed token.
    pub fn decode(&self, token: &str) -> Option<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[&self.issuer]);
        // Expiry is a hard boundary, no clock leeway
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .ok()
    }

    /// Check whether a valid token carries exactly the given role.
    ///
    /// Comparison is case-sensitive string equality on the role claim.
    pub fn has_role(&self, token: &str, role: &str) -> bool {
        self.decode(token).is_some_and(|claims| claims.role == role)
    }
}
