use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Freshness;
use auth::JwtError;

use crate::domain::account::errors::AuthError;
use crate::domain::account::models::Account;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::TokenRenewal;
use crate::domain::account::models::TokenStatus;
use crate::domain::account::models::TokenValidation;
use crate::domain::account::outcome::Outcome;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::AuthServicePort;
use crate::domain::account::ports::CredentialVerifier;

/// Authentication workflow over a single stored token per account.
///
/// Login and refresh overwrite the stored token; logout clears it. Every
/// operation computes its full result before the one `save` it performs,
/// so a failure never persists anything.
pub struct AuthService<AR, CV>
where
    AR: AccountRepository,
    CV: CredentialVerifier,
{
    repository: Arc<AR>,
    credential_verifier: Arc<CV>,
    authenticator: Arc<Authenticator>,
}

impl<AR, CV> AuthService<AR, CV>
where
    AR: AccountRepository,
    CV: CredentialVerifier,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `credential_verifier` - Email and secret checker
    /// * `authenticator` - Token codec, freshness policy and secret hasher
    pub fn new(
        repository: Arc<AR>,
        credential_verifier: Arc<CV>,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        Self {
            repository,
            credential_verifier,
            authenticator,
        }
    }

    async fn try_register(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let email = EmailAddress::new(email.to_string())?;

        if self.repository.find_by_email(email.as_str()).await?.is_some() {
            return Err(AuthError::DuplicateEmail(email.to_string()));
        }

        let password_hash = self
            .authenticator
            .hash_password(password)
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))?;

        let account = Account::register(email, password_hash, self.authenticator.now());
        self.repository.save(&account).await?;

        tracing::info!(account_id = %account.id, email = %account.email, "Account registered");
        Ok(())
    }

    async fn try_login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let mut account = self.verified_account(email, password).await?;

        let token = self
            .authenticator
            .issue_access_token(account.email.as_str())
            .map_err(issuance_failed)?;

        account.store_token(token.clone());
        self.repository.save(&account).await?;

        tracing::info!(account_id = %account.id, "Access token issued");
        Ok(token)
    }

    async fn try_refresh(&self, email: &str, password: &str) -> Result<TokenRenewal, AuthError> {
        let mut account = self.verified_account(email, password).await?;

        // Judged by the same short window as access tokens, so reuse only
        // happens within a minute of the stored token's issuance.
        if let Some(stored) = account.stored_token.as_deref() {
            if self.check_token(stored).is_ok() {
                tracing::debug!(account_id = %account.id, "Stored token still fresh, reusing");
                return Ok(TokenRenewal::Reused(stored.to_string()));
            }
        }

        let token = self
            .authenticator
            .issue_refresh_token(account.email.as_str())
            .map_err(issuance_failed)?;

        account.store_token(token.clone());
        self.repository.save(&account).await?;

        tracing::info!(account_id = %account.id, "Refresh token issued");
        Ok(TokenRenewal::Issued(token))
    }

    async fn try_logout(&self, token: &str) -> Result<(), AuthError> {
        self.check_token(token).map_err(|e| match e {
            AuthError::TokenExpired => {
                AuthError::TokenInvalid("freshness window elapsed".to_string())
            }
            other => other,
        })?;

        let mut account = self
            .repository
            .find_by_stored_token(token)
            .await?
            .ok_or_else(|| AuthError::AccountNotFound("no account holds this token".to_string()))?;

        account.clear_token();
        self.repository.save(&account).await?;

        tracing::info!(account_id = %account.id, "Stored token cleared");
        Ok(())
    }

    async fn verified_account(&self, email: &str, password: &str) -> Result<Account, AuthError> {
        self.credential_verifier.verify(email, password).await?;

        self.repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| AuthError::AccountNotFound(email.to_string()))
    }

    /// Subject of `token` if it verifies and is inside the freshness window.
    fn check_token(&self, token: &str) -> Result<String, AuthError> {
        match self.authenticator.assess(token) {
            Ok(Freshness::Valid { subject }) => Ok(subject),
            Ok(Freshness::Expired) => Err(AuthError::TokenExpired),
            Err(e) => Err(AuthError::TokenInvalid(e.to_string())),
        }
    }
}

fn issuance_failed(err: JwtError) -> AuthError {
    AuthError::Internal(format!("Token generation failed: {}", err))
}

fn reject<T>(operation: &'static str, err: AuthError) -> Outcome<T> {
    match err {
        AuthError::Storage(_) | AuthError::Internal(_) => {
            tracing::error!(operation, error = %err, "Authentication operation failed");
        }
        _ => tracing::warn!(operation, error = %err, "Authentication operation rejected"),
    }
    Outcome::failure(&err)
}

#[async_trait]
impl<AR, CV> AuthServicePort for AuthService<AR, CV>
where
    AR: AccountRepository,
    CV: CredentialVerifier,
{
    async fn register(&self, email: &str, password: &str) -> Outcome<()> {
        match self.try_register(email, password).await {
            Ok(()) => Outcome::done("Registration successful"),
            Err(err) => reject("register", err),
        }
    }

    async fn login(&self, email: &str, password: &str) -> Outcome<String> {
        match self.try_login(email, password).await {
            Ok(token) => Outcome::success(token, "Login successful"),
            Err(err) => reject("login", err),
        }
    }

    async fn validate(&self, token: &str) -> Outcome<TokenValidation> {
        match self.check_token(token) {
            Ok(subject) => Outcome::success(
                TokenValidation {
                    status: TokenStatus::Valid,
                    subject: Some(subject),
                    message: "Access token is still valid".to_string(),
                },
                "Token valid",
            ),
            Err(err @ AuthError::TokenExpired) => {
                tracing::debug!("Token outside freshness window");
                let window = self.authenticator.freshness_window().num_seconds();
                Outcome::failure_with(
                    TokenValidation {
                        status: TokenStatus::Expired,
                        subject: None,
                        message: format!(
                            "Access token is older than {} seconds, please refresh the token",
                            window
                        ),
                    },
                    &err,
                )
            }
            Err(err) => reject("validate", err),
        }
    }

    async fn refresh(&self, email: &str, password: &str) -> Outcome<String> {
        match self.try_refresh(email, password).await {
            Ok(TokenRenewal::Reused(token)) => Outcome::success(
                token,
                "Existing token is still valid, no refresh needed",
            ),
            Ok(TokenRenewal::Issued(token)) => Outcome::success(token, "Refresh token issued"),
            Err(err) => reject("refresh", err),
        }
    }

    async fn logout(&self, token: &str) -> Outcome<()> {
        match self.try_logout(token).await {
            Ok(()) => Outcome::done("Logout successful, token cleared"),
            Err(err) => reject("logout", err),
        }
    }
}
