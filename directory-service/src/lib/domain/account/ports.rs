use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::AuthSession;
use crate::account::models::EmailAddress;
use crate::account::models::LoginCommand;
use crate::account::models::Password;
use crate::account::models::RegisterCommand;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account and issue its first bearer token.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - An account with this email is already registered
    /// * `DatabaseError` - Store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, AccountError>;

    /// Verify credentials and issue a bearer token.
    ///
    /// An unknown email and a wrong password both fail with the same
    /// `InvalidCredentials` error so the response leaks nothing about which
    /// factor was wrong.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `DatabaseError` - Store operation failed
    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AccountError>;

    /// Look up an account by its email natural key.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_email(&self, email: &EmailAddress)
        -> Result<Option<Account>, AccountError>;

    /// Replace the stored password hash with one for the new password.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Store operation failed
    async fn change_password(
        &self,
        id: &AccountId,
        new_password: Password,
    ) -> Result<(), AccountError>;

    /// Remove an account.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Store operation failed
    async fn delete_account(&self, id: &AccountId) -> Result<(), AccountError>;

    /// Check whether a valid bearer token carries exactly the given role tag.
    fn has_role(&self, token: &str, role: &str) -> bool;
}

/// Persistence operations for the account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Unique email constraint violated
    /// * `DatabaseError` - Store operation failed
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve an account by email (None if not found).
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;

    /// Replace the stored password hash.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Store operation failed
    async fn update_password(
        &self,
        id: &AccountId,
        password_hash: &str,
    ) -> Result<(), AccountError>;

    /// Remove an account.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Store operation failed
    async fn delete(&self, id: &AccountId) -> Result<(), AccountError>;
}
