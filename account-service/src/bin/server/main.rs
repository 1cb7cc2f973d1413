use std::sync::Arc;

use account_service::config::Config;
use account_service::config::StorageBackend;
use account_service::domain::account::ports::AccountRepository;
use account_service::domain::account::ports::AuthServicePort;
use account_service::domain::account::service::AuthService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::credentials::StoredCredentialVerifier;
use account_service::outbound::repositories::InMemoryAccountRepository;
use account_service::outbound::repositories::PostgresAccountRepository;
use auth::Authenticator;
use auth::SystemClock;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        storage = ?config.storage.backend,
        access_token_ttl_minutes = config.jwt.access_token_ttl_minutes,
        refresh_token_ttl_days = config.jwt.refresh_token_ttl_days,
        freshness_window_seconds = config.jwt.freshness_window_seconds,
        "Configuration loaded"
    );

    let authenticator = Arc::new(
        Authenticator::new(config.jwt.secret.as_bytes(), Arc::new(SystemClock))
            .with_lifetimes(config.jwt.lifetimes()?)
            .with_freshness_window(config.jwt.freshness_window()?),
    );

    let auth_service: Arc<dyn AuthServicePort> = match config.storage.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory account storage; accounts are lost on restart");
            wire(Arc::new(InMemoryAccountRepository::new()), authenticator)
        }
        StorageBackend::Postgres => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            wire(Arc::new(PostgresAccountRepository::new(pg_pool)), authenticator)
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(auth_service)).await?;

    tracing::info!("Server exited");
    Ok(())
}

fn wire<AR: AccountRepository>(
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
) -> Arc<dyn AuthServicePort> {
    let credential_verifier = Arc::new(StoredCredentialVerifier::new(
        Arc::clone(&repository),
        Arc::clone(&authenticator),
    ));
    Arc::new(AuthService::new(repository, credential_verifier, authenticator))
}
