#![allow(dead_code)]

use std::sync::Arc;

use account_service::domain::account::service::AuthService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::credentials::StoredCredentialVerifier;
use account_service::outbound::repositories::InMemoryAccountRepository;
use auth::Authenticator;
use auth::ManualClock;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

pub type TestAuthService =
    AuthService<InMemoryAccountRepository, StoredCredentialVerifier<InMemoryAccountRepository>>;

/// Service wired to an in-memory store and a clock the test controls.
pub struct TestHarness {
    pub service: Arc<TestAuthService>,
    pub repository: Arc<InMemoryAccountRepository>,
    pub authenticator: Arc<Authenticator>,
    pub clock: Arc<ManualClock>,
}

impl TestHarness {
    pub fn new() -> Self {
        let clock = Arc::new(ManualClock::starting_now());
        let authenticator = Arc::new(Authenticator::new(JWT_SECRET, clock.clone()));
        let repository = Arc::new(InMemoryAccountRepository::new());
        let credential_verifier = Arc::new(StoredCredentialVerifier::new(
            Arc::clone(&repository),
            Arc::clone(&authenticator),
        ));

        let service = Arc::new(AuthService::new(
            Arc::clone(&repository),
            credential_verifier,
            Arc::clone(&authenticator),
        ));

        Self {
            service,
            repository,
            authenticator,
            clock,
        }
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub harness: TestHarness,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let harness = TestHarness::new();

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let router = create_router(harness.service.clone());

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            harness,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request carrying the token as `accessToken`
    ///
    /// JWTs are base64url segments joined by dots, so no escaping is needed.
    pub fn post_with_token(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(&format!("{}?accessToken={}", path, token))
    }
}
