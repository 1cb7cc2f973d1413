//! Token and secret primitives for credential-based authentication
//!
//! Provides the building blocks the account service composes:
//! - Secret hashing (Argon2id)
//! - Signed bearer tokens (HS256 JWT) with subject, issued-at and expiry
//! - A freshness window judged from issued-at, independent of expiry
//! - An injectable clock so time can be simulated in tests
//!
//! # Examples
//!
//! ## Issuing and assessing tokens
//! ```
//! use std::sync::Arc;
//!
//! use auth::{Authenticator, Freshness, SystemClock};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Arc::new(SystemClock));
//!
//! let token = auth.issue_access_token("a@x.com").unwrap();
//! let verdict = auth.assess(&token).unwrap();
//! assert_eq!(verdict, Freshness::Valid { subject: "a@x.com".to_string() });
//! ```
//!
//! ## Simulating time
//! ```
//! use std::sync::Arc;
//!
//! use auth::{Authenticator, Freshness, ManualClock};
//! use chrono::Duration;
//!
//! let clock = Arc::new(ManualClock::starting_now());
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", clock.clone());
//!
//! let token = auth.issue_access_token("a@x.com").unwrap();
//! clock.advance(Duration::seconds(61));
//! assert_eq!(auth.assess(&token).unwrap(), Freshness::Expired);
//! ```

pub mod authenticator;
pub mod clock;
pub mod freshness;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use authenticator::TokenLifetimes;
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use freshness::Freshness;
pub use freshness::FreshnessPolicy;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenClaims;
pub use password::PasswordError;
pub use password::PasswordHasher;
