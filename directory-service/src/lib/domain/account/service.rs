use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::AuthSession;
use crate::account::models::EmailAddress;
use crate::account::models::LoginCommand;
use crate::account::models::Password;
use crate::account::models::RegisterCommand;
use crate::account::models::Role;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;

/// Domain service implementation for account operations.
///
/// Composes the repository with the credential toolkit: password hashing and
/// bearer token issuance live in the `auth` crate, persistence behind the
/// repository port.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    /// Create a new account service with injected dependencies.
    pub fn new(repository: Arc<AR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, AccountError> {
        // Friendly pre-check; the unique index on email backs it up against
        // the concurrent-registration race.
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(AccountError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        let password_hash = self
            .authenticator
            .hash_password(command.password.as_str())
            .map_err(|e| AccountError::Unknown(format!("Password hashing failed: {}", e)))?;

        let account = Account {
            id: AccountId::new(),
            email: command.email,
            password_hash,
            role: Role::User,
            created_at: Utc::now(),
        };

        let account = self.repository.create(account).await?;

        let access_token = self
            .authenticator
            .issue_token(
                &account.id.to_string(),
                account.email.as_str(),
                account.role.as_str(),
            )
            .map_err(|e| AccountError::Unknown(format!("Token issuance failed: {}", e)))?;

        tracing::info!(account_id = %account.id, role = %account.role, "Account registered");

        Ok(AuthSession {
            account,
            access_token,
        })
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AccountError> {
        let account = self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        let result = self
            .authenticator
            .authenticate(
                &command.password,
                &account.password_hash,
                &account.id.to_string(),
                account.email.as_str(),
                account.role.as_str(),
            )
            .map_err(|e| match e {
                auth::AuthenticationError::InvalidCredentials => AccountError::InvalidCredentials,
                other => AccountError::Unknown(other.to_string()),
            })?;

        Ok(AuthSession {
            account,
            access_token: result.access_token,
        })
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountError> {
        self.repository.find_by_email(email.as_str()).await
    }

    async fn change_password(
        &self,
        id: &AccountId,
        new_password: Password,
    ) -> Result<(), AccountError> {
        let password_hash = self
            .authenticator
            .hash_password(new_password.as_str())
            .map_err(|e| AccountError::Unknown(format!("Password hashing failed: {}", e)))?;

        self.repository.update_password(id, &password_hash).await
    }

    async fn delete_account(&self, id: &AccountId) -> Result<(), AccountError> {
        self.repository.delete(id).await
    }

    fn has_role(&self, token: &str, role: &str) -> bool {
        self.authenticator.has_role(token, role)
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;

    mock! {
        pub TestAccountRepository {}

        #[async_trait]
        impl AccountRepository for TestAccountRepository {
            async fn create(&self, account: Account) -> Result<Account, AccountError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;
            async fn update_password(&self, id: &AccountId, password_hash: &str) -> Result<(), AccountError>;
            async fn delete(&self, id: &AccountId) -> Result<(), AccountError>;
        }
    }

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::new(
            b"test-secret-key-for-jwt-signing-at-least-32-bytes",
            "directory-service",
            24,
        ))
    }

    fn register_command(email: &str, password: &str) -> RegisterCommand {
        RegisterCommand::new(
            EmailAddress::new(email.to_string()).unwrap(),
            Password::new(password.to_string()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_email()
            .with(eq("a@b.com"))
            .times(1)
            .returning(|_| Ok(None));

        repository
            .expect_create()
            .withf(|account| {
                account.email.as_str() == "a@b.com"
                    && account.role == Role::User
                    && account.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(Ok);

        let auth = authenticator();
        let service = AccountService::new(Arc::new(repository), Arc::clone(&auth));

        let session = service
            .register(register_command("a@b.com", "Abcdef12"))
            .await
            .expect("registration failed");

        // Token decodes back to the freshly created account
        let claims = auth.decode_token(&session.access_token).unwrap();
        assert_eq!(claims.sub, session.account.id.to_string());
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.role, "user");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repository = MockTestAccountRepository::new();

        repository.expect_find_by_email().times(1).returning(|_| {
            Ok(Some(Account {
                id: AccountId::new(),
                email: EmailAddress::new("a@b.com".to_string()).unwrap(),
                password_hash: "$argon2id$existing".to_string(),
                role: Role::User,
                created_at: Utc::now(),
            }))
        });

        // Nothing may be inserted when the pre-check trips
        repository.expect_create().times(0);

        let service = AccountService::new(Arc::new(repository), authenticator());

        let result = service.register(register_command("a@b.com", "Abcdef12")).await;
        assert!(matches!(
            result.unwrap_err(),
            AccountError::EmailAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_login_success_round_trips_claims() {
        let auth = authenticator();
        let password_hash = auth.hash_password("Abcdef12").unwrap();
        let account_id = AccountId::new();

        let mut repository = MockTestAccountRepository::new();
        let stored = Account {
            id: account_id,
            email: EmailAddress::new("a@b.com".to_string()).unwrap(),
            password_hash,
            role: Role::Ngo,
            created_at: Utc::now(),
        };
        repository
            .expect_find_by_email()
            .with(eq("a@b.com"))
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let service = AccountService::new(Arc::new(repository), Arc::clone(&auth));

        let session = service
            .login(LoginCommand {
                email: EmailAddress::new("a@b.com".to_string()).unwrap(),
                password: "Abcdef12".to_string(),
            })
            .await
            .expect("login failed");

        let claims = auth.decode_token(&session.access_token).unwrap();
        assert_eq!(claims.sub, account_id.to_string());
        assert_eq!(claims.role, "ngo");
    }

    #[tokio::test]
    async fn test_login_wrong_password_and_unknown_email_are_indistinguishable() {
        let auth = authenticator();
        let password_hash = auth.hash_password("Correct12").unwrap();

        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_email()
            .with(eq("known@b.com"))
            .returning(move |_| {
                Ok(Some(Account {
                    id: AccountId::new(),
                    email: EmailAddress::new("known@b.com".to_string()).unwrap(),
                    password_hash: password_hash.clone(),
                    role: Role::User,
                    created_at: Utc::now(),
                }))
            });
        repository
            .expect_find_by_email()
            .with(eq("unknown@b.com"))
            .returning(|_| Ok(None));

        let service = AccountService::new(Arc::new(repository), auth);

        let wrong_password = service
            .login(LoginCommand {
                email: EmailAddress::new("known@b.com".to_string()).unwrap(),
                password: "Wrong1234".to_string(),
            })
            .await
            .unwrap_err();
        let unknown_email = service
            .login(LoginCommand {
                email: EmailAddress::new("unknown@b.com".to_string()).unwrap(),
                password: "Whatever1".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AccountError::InvalidCredentials));
        assert!(matches!(unknown_email, AccountError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_change_password_rehashes() {
        let account_id = AccountId::new();

        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_update_password()
            .withf(move |id, hash| *id == account_id && hash.starts_with("$argon2"))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = AccountService::new(Arc::new(repository), authenticator());

        service
            .change_password(&account_id, Password::new("Newpass12".to_string()).unwrap())
            .await
            .expect("change_password failed");
    }

    #[tokio::test]
    async fn test_delete_account_not_found() {
        let account_id = AccountId::new();

        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_delete()
            .times(1)
            .returning(move |_| Err(AccountError::NotFound(account_id.to_string())));

        let service = AccountService::new(Arc::new(repository), authenticator());

        let result = service.delete_account(&account_id).await;
        assert!(matches!(result.unwrap_err(), AccountError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_has_role_delegates_to_token() {
        let auth = authenticator();
        let token = auth.issue_token("account-1", "a@b.com", "clinic").unwrap();

        let repository = MockTestAccountRepository::new();
        let service = AccountService::new(Arc::new(repository), auth);

        assert!(service.has_role(&token, "clinic"));
        assert!(!service.has_role(&token, "admin"));
    }
}
