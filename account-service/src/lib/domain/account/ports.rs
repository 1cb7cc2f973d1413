use async_trait::async_trait;

use crate::domain::account::errors::AuthError;
use crate::domain::account::models::Account;
use crate::domain::account::models::TokenValidation;
use crate::domain::account::outcome::Outcome;

/// Port for the authentication workflow.
///
/// Every operation answers with an `Outcome`; none of them returns early
/// with a partially applied state change.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Create an account with no stored token.
    ///
    /// # Failures
    /// * `DuplicateEmail` - Email is already registered
    /// * `InvalidEmail` - Email is not syntactically valid
    /// * `StorageError` - Persistence failed
    async fn register(&self, email: &str, password: &str) -> Outcome<()>;

    /// Verify credentials and issue a short-lived token, replacing the
    /// stored one.
    ///
    /// # Failures
    /// * `BadCredentials` - Email or password is wrong
    /// * `AccountNotFound` - Credentials verified but the account vanished
    /// * `StorageError` - Persistence failed
    async fn login(&self, email: &str, password: &str) -> Outcome<String>;

    /// Report whether `token` is usable right now.
    ///
    /// # Failures
    /// * `TokenExpired` - Freshness window elapsed (payload status EXPIRED)
    /// * `TokenInvalid` - Signature, format or claims are bad
    async fn validate(&self, token: &str) -> Outcome<TokenValidation>;

    /// Re-verify credentials and hand back the stored token if it is still
    /// fresh, otherwise issue and store a long-lived one.
    ///
    /// # Failures
    /// * `BadCredentials` - Email or password is wrong
    /// * `AccountNotFound` - Credentials verified but the account vanished
    /// * `StorageError` - Persistence failed
    async fn refresh(&self, email: &str, password: &str) -> Outcome<String>;

    /// Clear the stored token of the account holding `token`.
    ///
    /// # Failures
    /// * `TokenInvalid` - Token is not currently valid
    /// * `AccountNotFound` - No account has this token on record
    /// * `StorageError` - Persistence failed
    async fn logout(&self, token: &str) -> Outcome<()>;
}

/// Persistence operations for the account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Retrieve account by email address.
    ///
    /// # Errors
    /// * `Storage` - Backend failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AuthError>;

    /// Retrieve the account whose stored token equals `token`.
    ///
    /// # Errors
    /// * `Storage` - Backend failed
    async fn find_by_stored_token(&self, token: &str) -> Result<Option<Account>, AuthError>;

    /// Insert or overwrite the account. Concurrent writers: last one wins.
    ///
    /// # Errors
    /// * `DuplicateEmail` - Another account already owns this email
    /// * `Storage` - Backend failed
    async fn save(&self, account: &Account) -> Result<(), AuthError>;
}

/// Opaque check of an email and secret pair.
#[async_trait]
pub trait CredentialVerifier: Send + Sync + 'static {
    /// # Errors
    /// * `BadCredentials` - Pair does not match a stored identity
    /// * `Storage` - Identity lookup failed
    async fn verify(&self, email: &str, password: &str) -> Result<(), AuthError>;
}
