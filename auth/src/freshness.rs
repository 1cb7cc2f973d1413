use std::sync::Arc;

use chrono::Duration;

use crate::clock::Clock;
use crate::jwt::JwtError;
use crate::jwt::TokenClaims;

/// Default freshness window measured from a token's issued-at.
pub const DEFAULT_FRESHNESS_WINDOW_SECONDS: i64 = 60;

/// Verdict of a freshness check on a token that parsed successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Freshness {
    Valid { subject: String },
    Expired,
}

impl Freshness {
    pub fn is_valid(&self) -> bool {
        matches!(self, Freshness::Valid { .. })
    }
}

/// Judges tokens stale once they are older than a fixed window.
///
/// The window is independent of, and normally much shorter than, the
/// token's own `exp` claim: a token can verify cryptographically and still
/// be reported as expired here.
pub struct FreshnessPolicy {
    window: Duration,
    clock: Arc<dyn Clock>,
}

impl FreshnessPolicy {
    pub fn new(window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { window, clock }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Judge already verified claims.
    ///
    /// # Errors
    /// * `MissingClaim("iat")` - Token has no issued-at; never treated as fresh
    pub fn judge(&self, claims: &TokenClaims) -> Result<Freshness, JwtError> {
        let issued_at = claims
            .issued_at
            .ok_or_else(|| JwtError::MissingClaim("iat".to_string()))?;

        let age = self.clock.now() - issued_at;
        if age >= self.window {
            Ok(Freshness::Expired)
        } else {
            Ok(Freshness::Valid {
                subject: claims.subject.clone(),
            })
        }
    }
}
