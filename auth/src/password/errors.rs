use thiserror::Error;

/// Error type for secret hashing and verification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Secret hashing failed: {0}")]
    HashingFailed(String),

    #[error("Secret verification failed: {0}")]
    VerificationFailed(String),
}
