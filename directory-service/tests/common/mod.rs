use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use directory_service::domain::account::errors::AccountError;
use directory_service::domain::account::models::Account;
use directory_service::domain::account::models::AccountId;
use directory_service::domain::account::ports::AccountRepository;
use directory_service::domain::account::service::AccountService;
use directory_service::domain::resource::errors::ResourceError;
use directory_service::domain::resource::models::DocumentId;
use directory_service::domain::resource::models::ResourceRecord;
use directory_service::domain::resource::ports::DocumentStore;
use directory_service::domain::resource::schemas;
use directory_service::domain::resource::service::ResourceService;
use directory_service::domain::subscription::errors::NotifyError;
use directory_service::domain::subscription::errors::SubscriptionError;
use directory_service::domain::subscription::models::Subscription;
use directory_service::domain::subscription::models::SubscriptionId;
use directory_service::domain::subscription::ports::NotificationSink;
use directory_service::domain::subscription::ports::SubscriptionRepository;
use directory_service::domain::subscription::service::SubscriptionService;
use directory_service::inbound::http::middleware::AccessPolicy;
use directory_service::inbound::http::router::create_router;
use directory_service::inbound::http::router::AppState;
use directory_service::inbound::http::router::ResourceRegistry;
use serde_json::Value;

pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TEST_ISSUER: &str = "directory-service";
pub const TEST_API_KEY: &str = "machine-key-1";

/// Test application that spawns a real server over in-memory adapters
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
    pub sink: Arc<RecordingSink>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(Authenticator::new(TEST_JWT_SECRET, TEST_ISSUER, 24));

        let accounts = Arc::new(AccountService::new(
            Arc::new(InMemoryAccountRepository::default()),
            Arc::clone(&authenticator),
        ));

        let store = Arc::new(InMemoryDocumentStore::default());
        let mut registry = ResourceRegistry::new();
        for schema in schemas::ALL {
            registry.register(
                schema.domain,
                Arc::new(ResourceService::new(schema, Arc::clone(&store))),
            );
        }

        let sink = Arc::new(RecordingSink::default());
        let subscriptions = Arc::new(SubscriptionService::new(
            Arc::new(InMemorySubscriptionRepository::default()),
            Arc::clone(&sink),
        ));

        let access = Arc::new(AccessPolicy::new(HashMap::from([(
            TEST_API_KEY.to_string(),
            "government".to_string(),
        )])));

        let state = AppState {
            accounts,
            resources: Arc::new(registry),
            subscriptions,
            authenticator: Arc::clone(&authenticator),
            access,
        };

        let router = create_router(state);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            authenticator,
            sink,
        }
    }

    /// Mint a bearer token for an arbitrary role, bypassing registration.
    pub fn token_for_role(&self, role: &str) -> String {
        self.authenticator
            .issue_token(
                &uuid::Uuid::new_v4().to_string(),
                "tester@example.com",
                role,
            )
            .expect("Failed to issue test token")
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make PATCH request
    pub fn patch(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.patch(format!("{}{}", self.address, path))
    }

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }
}

/// In-memory account store keyed by the unique email.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<Vec<Account>>,
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts
            .iter()
            .any(|a| a.email.as_str() == account.email.as_str())
        {
            return Err(AccountError::EmailAlreadyExists(
                account.email.as_str().to_string(),
            ));
        }
        accounts.push(account.clone());
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().find(|a| a.email.as_str() == email).cloned())
    }

    async fn update_password(
        &self,
        id: &AccountId,
        password_hash: &str,
    ) -> Result<(), AccountError> {
        let mut accounts = self.accounts.lock().unwrap();
        match accounts.iter_mut().find(|a| a.id == *id) {
            Some(account) => {
                account.password_hash = password_hash.to_string();
                Ok(())
            }
            None => Err(AccountError::NotFound(id.to_string())),
        }
    }

    async fn delete(&self, id: &AccountId) -> Result<(), AccountError> {
        let mut accounts = self.accounts.lock().unwrap();
        let before = accounts.len();
        accounts.retain(|a| a.id != *id);
        if accounts.len() == before {
            return Err(AccountError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

/// In-memory document store, one record list per collection.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    collections: Mutex<HashMap<String, Vec<ResourceRecord>>>,
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn insert(
        &self,
        collection: &str,
        fields: &BTreeMap<String, String>,
    ) -> Result<ResourceRecord, ResourceError> {
        let record = ResourceRecord {
            id: DocumentId::new(),
            fields: fields.clone(),
        };
        let mut collections = self.collections.lock().unwrap();
        collections
            .entry(collection.to_string())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<ResourceRecord>, ResourceError> {
        let collections = self.collections.lock().unwrap();
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn find_by_id(
        &self,
        collection: &str,
        id: &DocumentId,
    ) -> Result<Option<ResourceRecord>, ResourceError> {
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(collection)
            .and_then(|records| records.iter().find(|r| r.id == *id).cloned()))
    }

    async fn replace(
        &self,
        collection: &str,
        id: &DocumentId,
        fields: &BTreeMap<String, String>,
    ) -> Result<(), ResourceError> {
        let mut collections = self.collections.lock().unwrap();
        let record = collections
            .get_mut(collection)
            .and_then(|records| records.iter_mut().find(|r| r.id == *id))
            .ok_or_else(|| ResourceError::NotFound(id.to_string()))?;
        record.fields = fields.clone();
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &DocumentId) -> Result<(), ResourceError> {
        let mut collections = self.collections.lock().unwrap();
        let records = collections
            .get_mut(collection)
            .ok_or_else(|| ResourceError::NotFound(id.to_string()))?;
        let before = records.len();
        records.retain(|r| r.id != *id);
        if records.len() == before {
            return Err(ResourceError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

/// In-memory subscription store.
#[derive(Default)]
pub struct InMemorySubscriptionRepository {
    subscriptions: Mutex<Vec<Subscription>>,
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn create(
        &self,
        subscription: Subscription,
    ) -> Result<Subscription, SubscriptionError> {
        let mut subscriptions = self.subscriptions.lock().unwrap();
        subscriptions.push(subscription.clone());
        Ok(subscription)
    }

    async fn find_by_interest(
        &self,
        resource: &str,
        city: &str,
    ) -> Result<Vec<Subscription>, SubscriptionError> {
        let subscriptions = self.subscriptions.lock().unwrap();
        Ok(subscriptions
            .iter()
            .filter(|s| s.resource == resource && s.city == city)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &SubscriptionId) -> Result<(), SubscriptionError> {
        let mut subscriptions = self.subscriptions.lock().unwrap();
        let before = subscriptions.len();
        subscriptions.retain(|s| s.id != *id);
        if subscriptions.len() == before {
            return Err(SubscriptionError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

/// Notification sink that records deliveries instead of performing them.
#[derive(Default)]
pub struct RecordingSink {
    pub emails: Mutex<Vec<(String, String, String)>>,
    pub webhooks: Mutex<Vec<(String, Value)>>,
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        self.emails.lock().unwrap().push((
            to.to_string(),
            subject.to_string(),
            body.to_string(),
        ));
        Ok(())
    }

    async fn post_webhook(&self, url: &str, payload: &Value) -> Result<(), NotifyError> {
        self.webhooks
            .lock()
            .unwrap()
            .push((url.to_string(), payload.clone()));
        Ok(())
    }
}
