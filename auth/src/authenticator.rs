use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::Claims;
use crate::token::TokenError;
use crate::token::TokenService;

/// Authentication coordinator combining password verification and token issuance.
///
/// Provides high-level authentication operations by coordinating
/// password hashing and bearer token handling.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_service: TokenService,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed bearer access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `issuer` - Issuer name stamped into and required from every token
    /// * `validity_hours` - Token lifetime in hours
    pub fn new(jwt_secret: &[u8], issuer: &str, validity_hours: i64) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_service: TokenService::new(jwt_secret, issuer)
                .with_validity_hours(validity_hours),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and generate a bearer token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `account_id` - Account identifier for the token subject
    /// * `email` - Account email claim
    /// * `role` - Account role claim
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        account_id: &str,
        email: &str,
        role: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_service.issue(account_id, email, role)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a token without password verification.
    ///
    /// Used at registration, where the credential was just created.
    ///
    /// # Errors
    /// * `TokenError` - Token generation failed
    pub fn issue_token(
        &self,
        account_id: &str,
        email: &str,
        role: &str,
    ) -> Result<String, TokenError> {
        self.token_service.issue(account_id, email, role)
    }

    /// Check whether a token is currently valid.
    pub fn verify_token(&self, token: &str) -> bool {
        self.token_service.verify(token)
    }

    /// Decode a token, returning None if it fails validation.
    pub fn decode_token(&self, token: &str) -> Option<Claims> {
        self.token_service.decode(token)
    }

    /// Check whether a valid token carries exactly the given role.
    pub fn has_role(&self, token: &str, role: &str) -> bool {
        self.token_service.has_role(token, role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticator() -> Authenticator {
        Authenticator::new(
            b"test_secret_key_at_least_32_bytes!",
            "directory-service",
            24,
        )
    }

    #[test]
    fn test_authenticate_success() {
        let auth = authenticator();

        let password = "my_password";
        let hash = auth.hash_password(password).expect("Failed to hash password");

        let result = auth
            .authenticate(password, &hash, "account-1", "a@b.com", "user")
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());

        let claims = auth
            .decode_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(claims.sub, "account-1");
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.role, "user");
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let auth = authenticator();

        let hash = auth
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = auth.authenticate("wrong_password", &hash, "account-1", "a@b.com", "user");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_malformed_stored_hash() {
        let auth = authenticator();

        // Corrupt stored hash reads as a plain mismatch
        let result = auth.authenticate("my_password", "garbage", "account-1", "a@b.com", "user");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_issue_and_verify_token() {
        let auth = authenticator();

        let token = auth
            .issue_token("account-1", "a@b.com", "ngo")
            .expect("Failed to issue token");

        assert!(auth.verify_token(&token));
        assert!(auth.has_role(&token, "ngo"));
        assert!(!auth.has_role(&token, "user"));
    }

    #[test]
    fn test_verify_invalid_token() {
        let auth = authenticator();

        assert!(!auth.verify_token("invalid.token.here"));
        assert!(auth.decode_token("invalid.token.here").is_none());
    }
}
