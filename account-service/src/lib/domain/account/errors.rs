use serde::Serialize;
use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Failure taxonomy of the authentication workflow.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Wrong email or password")]
    BadCredentials,

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Token is invalid: {0}")]
    TokenInvalid(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Malformed request: {0}")]
    BadRequest(String),

    // Infrastructure errors
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::DuplicateEmail(_) => ErrorKind::DuplicateEmail,
            AuthError::BadCredentials => ErrorKind::BadCredentials,
            AuthError::AccountNotFound(_) => ErrorKind::AccountNotFound,
            AuthError::TokenInvalid(_) => ErrorKind::TokenInvalid,
            AuthError::TokenExpired => ErrorKind::TokenExpired,
            AuthError::InvalidEmail(_) => ErrorKind::InvalidEmail,
            AuthError::BadRequest(_) => ErrorKind::BadRequest,
            AuthError::Storage(_) => ErrorKind::StorageError,
            AuthError::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError::Internal(err.to_string())
    }
}

/// Machine-readable failure kind carried by a failed outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    DuplicateEmail,
    BadCredentials,
    AccountNotFound,
    TokenInvalid,
    TokenExpired,
    InvalidEmail,
    BadRequest,
    StorageError,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_wire_names() {
        let json = serde_json::to_value(AuthError::BadCredentials.kind()).unwrap();
        assert_eq!(json, "BAD_CREDENTIALS");

        let json = serde_json::to_value(AuthError::Storage("down".to_string()).kind()).unwrap();
        assert_eq!(json, "STORAGE_ERROR");

        let json = serde_json::to_value(AuthError::BadRequest("no body".to_string()).kind()).unwrap();
        assert_eq!(json, "BAD_REQUEST");
    }
}
