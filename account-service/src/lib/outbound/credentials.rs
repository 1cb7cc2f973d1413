use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;

use crate::domain::account::errors::AuthError;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::CredentialVerifier;

/// Checks credentials against the Argon2 hash stored on the account.
///
/// Unknown email and wrong secret are indistinguishable to the caller.
pub struct StoredCredentialVerifier<AR: AccountRepository> {
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
}

impl<AR: AccountRepository> StoredCredentialVerifier<AR> {
    pub fn new(repository: Arc<AR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<AR: AccountRepository> CredentialVerifier for StoredCredentialVerifier<AR> {
    async fn verify(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let account = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(AuthError::BadCredentials)?;

        match self
            .authenticator
            .verify_password(password, &account.password_hash)
        {
            Ok(true) => Ok(()),
            Ok(false) => Err(AuthError::BadCredentials),
            Err(e) => {
                tracing::warn!(account_id = %account.id, error = %e, "Stored password hash unreadable");
                Err(AuthError::BadCredentials)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use auth::ManualClock;
    use chrono::Utc;

    use super::*;
    use crate::domain::account::models::Account;
    use crate::domain::account::models::EmailAddress;
    use crate::outbound::repositories::InMemoryAccountRepository;

    async fn verifier_with(
        password_hash: impl FnOnce(&Authenticator) -> String,
    ) -> StoredCredentialVerifier<InMemoryAccountRepository> {
        let authenticator = Arc::new(Authenticator::new(
            b"test_secret_key_at_least_32_bytes!",
            Arc::new(ManualClock::starting_now()),
        ));
        let repository = Arc::new(InMemoryAccountRepository::new());

        let account = Account::register(
            EmailAddress::new("a@x.com".to_string()).unwrap(),
            password_hash(&authenticator),
            Utc::now(),
        );
        repository.save(&account).await.unwrap();

        StoredCredentialVerifier::new(repository, authenticator)
    }

    #[tokio::test]
    async fn test_verify_matching_credentials() {
        let verifier = verifier_with(|a| a.hash_password("p1").unwrap()).await;

        assert_eq!(verifier.verify("a@x.com", "p1").await, Ok(()));
        assert_eq!(
            verifier.verify("a@x.com", "p2").await,
            Err(AuthError::BadCredentials)
        );
    }

    #[tokio::test]
    async fn test_verify_unknown_email() {
        let verifier = verifier_with(|a| a.hash_password("p1").unwrap()).await;

        assert_eq!(
            verifier.verify("b@x.com", "p1").await,
            Err(AuthError::BadCredentials)
        );
    }

    #[tokio::test]
    async fn test_verify_unreadable_hash() {
        let verifier = verifier_with(|_| "plaintext".to_string()).await;

        assert_eq!(
            verifier.verify("a@x.com", "plaintext").await,
            Err(AuthError::BadCredentials)
        );
    }
}
