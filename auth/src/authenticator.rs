use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::clock::Clock;
use crate::freshness::Freshness;
use crate::freshness::FreshnessPolicy;
use crate::freshness::DEFAULT_FRESHNESS_WINDOW_SECONDS;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenClaims;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Lifetimes written into the `exp` claim of issued tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    /// Short-lived token handed out on login
    pub access: Duration,
    /// Long-lived token handed out on refresh
    pub refresh: Duration,
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            access: Duration::minutes(15),
            refresh: Duration::days(7),
        }
    }
}

/// Token and secret coordinator.
///
/// Bundles secret hashing, the HS256 codec and the freshness policy behind
/// one clock, so every "now" seen by a single operation comes from the same
/// source.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    freshness: FreshnessPolicy,
    lifetimes: TokenLifetimes,
    clock: Arc<dyn Clock>,
}

impl Authenticator {
    /// Create an authenticator with default lifetimes and freshness window.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `clock` - Time source shared by issuance and validation
    pub fn new(jwt_secret: &[u8], clock: Arc<dyn Clock>) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret, Arc::clone(&clock)),
            freshness: FreshnessPolicy::new(
                Duration::seconds(DEFAULT_FRESHNESS_WINDOW_SECONDS),
                Arc::clone(&clock),
            ),
            lifetimes: TokenLifetimes::default(),
            clock,
        }
    }

    pub fn with_lifetimes(mut self, lifetimes: TokenLifetimes) -> Self {
        self.lifetimes = lifetimes;
        self
    }

    pub fn with_freshness_window(mut self, window: Duration) -> Self {
        self.freshness = FreshnessPolicy::new(window, Arc::clone(&self.clock));
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn freshness_window(&self) -> Duration {
        self.freshness.window()
    }

    /// Hash a secret for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a secret against a stored hash.
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash is unreadable
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Issue a short-lived token for `subject`.
    pub fn issue_access_token(&self, subject: &str) -> Result<String, JwtError> {
        self.jwt_handler.issue(subject, self.lifetimes.access)
    }

    /// Issue a long-lived token for `subject`.
    pub fn issue_refresh_token(&self, subject: &str) -> Result<String, JwtError> {
        self.jwt_handler.issue(subject, self.lifetimes.refresh)
    }

    /// Verify signature and expiry of `token`.
    pub fn parse_token(&self, token: &str) -> Result<TokenClaims, JwtError> {
        self.jwt_handler.parse(token)
    }

    /// Parse `token` and judge it against the freshness window.
    ///
    /// # Errors
    /// Any `JwtError` from parsing, or `MissingClaim("iat")` when the token
    /// carries no issued-at.
    pub fn assess(&self, token: &str) -> Result<Freshness, JwtError> {
        let claims = self.jwt_handler.parse(token)?;
        self.freshness.judge(&claims)
    }
}
