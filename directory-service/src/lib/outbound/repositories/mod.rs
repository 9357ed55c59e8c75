pub mod accounts;
pub mod documents;
pub mod subscriptions;

pub use accounts::PostgresAccountRepository;
pub use documents::PostgresDocumentStore;
pub use subscriptions::PostgresSubscriptionRepository;
