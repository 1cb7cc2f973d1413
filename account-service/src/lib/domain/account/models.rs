use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::account::errors::EmailError;

/// Account aggregate entity.
///
/// `stored_token` holds the most recently issued token for the account, or
/// `None` after logout. There is never more than one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub stored_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Build a freshly registered account with no stored token.
    pub fn register(email: EmailAddress, password_hash: String, now: DateTime<Utc>) -> Self {
        Self {
            id: AccountId::new(),
            email,
            password_hash,
            stored_token: None,
            created_at: now,
        }
    }

    /// Replace whatever token was on record.
    pub fn store_token(&mut self, token: String) {
        self.stored_token = Some(token);
    }

    pub fn clear_token(&mut self) {
        self.stored_token = None;
    }
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Status reported by token validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenStatus {
    Valid,
    Expired,
}

/// Payload of a validation outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenValidation {
    pub status: TokenStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
}

/// Which branch a refresh took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenRenewal {
    /// The stored token was still fresh and is handed back unchanged
    Reused(String),
    /// A new long-lived token was minted and stored
    Issued(String),
}
