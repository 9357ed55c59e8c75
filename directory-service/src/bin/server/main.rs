use std::sync::Arc;

use auth::Authenticator;
use directory_service::config::Config;
use directory_service::domain::account::service::AccountService;
use directory_service::domain::resource::schemas;
use directory_service::domain::resource::service::ResourceService;
use directory_service::domain::subscription::service::SubscriptionService;
use directory_service::inbound::http::middleware::AccessPolicy;
use directory_service::inbound::http::router::create_router;
use directory_service::inbound::http::router::AppState;
use directory_service::inbound::http::router::ResourceRegistry;
use directory_service::outbound::notify::DeliveryNotifier;
use directory_service::outbound::repositories::PostgresAccountRepository;
use directory_service::outbound::repositories::PostgresDocumentStore;
use directory_service::outbound::repositories::PostgresSubscriptionRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "directory_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "directory-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_issuer = %config.jwt.issuer,
        smtp_host = %config.smtp.host,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        &config.jwt.issuer,
        config.jwt.expiration_hours,
    ));

    let account_repository = Arc::new(PostgresAccountRepository::new(pg_pool.clone()));
    let accounts = Arc::new(AccountService::new(
        account_repository,
        Arc::clone(&authenticator),
    ));

    let document_store = Arc::new(PostgresDocumentStore::new(pg_pool.clone()));
    let mut registry = ResourceRegistry::new();
    for schema in schemas::ALL {
        registry.register(
            schema.domain,
            Arc::new(ResourceService::new(schema, Arc::clone(&document_store))),
        );
    }

    let subscription_repository = Arc::new(PostgresSubscriptionRepository::new(pg_pool));
    let notifier = Arc::new(DeliveryNotifier::new(&config)?);
    let subscriptions = Arc::new(SubscriptionService::new(subscription_repository, notifier));

    let access = Arc::new(AccessPolicy::new(config.access.api_keys.clone()));

    let state = AppState {
        accounts,
        resources: Arc::new(registry),
        subscriptions,
        authenticator,
        access,
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state)).await?;

    Ok(())
}
