//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for the directory service:
//! - Password hashing (Argon2id)
//! - Signed bearer token issuance and validation (JWT, HS256)
//! - Authentication coordination
//!
//! The service defines its own domain traits and adapts these implementations,
//! keeping credential handling out of the domain layer.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("wrong_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::TokenService;
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!", "directory-service");
//! let token = tokens.issue("account-1", "a@b.com", "user").unwrap();
//! assert!(tokens.verify(&token));
//! assert!(tokens.has_role(&token, "user"));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", "directory-service", 24);
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth.authenticate("password123", &hash, "account-1", "a@b.com", "user").unwrap();
//!
//! // Validate token
//! let claims = auth.decode_token(&result.access_token).unwrap();
//! assert_eq!(claims.sub, "account-1");
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenError;
pub use token::TokenService;
