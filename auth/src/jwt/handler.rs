use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::TokenClaims;
use super::errors::JwtError;
use crate::clock::Clock;

/// JWT token handler for issuing and parsing signed bearer tokens.
///
/// Uses HS256 (HMAC with SHA-256). The signing key is fixed at construction;
/// building a handler with a different key invalidates every token issued
/// by the previous one.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    clock: Arc<dyn Clock>,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    /// * `clock` - Source of "now" for issued-at, expiry and expiry checks
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8], clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            clock,
        }
    }

    /// Issue a token for `subject` that expires `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<String, JwtError> {
        let claims = Claims::for_subject(subject, self.clock.now(), ttl);
        self.encode(&claims)
    }

    /// Sign arbitrary claims.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify the signature and expiry of `token` and return its claims.
    ///
    /// Expiry is judged against the injected clock, not the library's
    /// system time.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature does not verify under this key
    /// * `Malformed` - Token is not a well-formed JWT
    /// * `TokenExpired` - The `exp` claim lies in the past
    /// * `MissingClaim` - Token carries no subject
    pub fn parse(&self, token: &str) -> Result<TokenClaims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::Malformed(e.to_string()),
            })?
            .claims;

        if claims.is_expired(self.clock.now().timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        let subject = claims
            .sub
            .ok_or_else(|| JwtError::MissingClaim("sub".to_string()))?;

        Ok(TokenClaims {
            subject,
            issued_at: claims.iat.map(timestamp_to_instant).transpose()?,
            expires_at: claims.exp.map(timestamp_to_instant).transpose()?,
        })
    }
}

fn timestamp_to_instant(timestamp: i64) -> Result<DateTime<Utc>, JwtError> {
    DateTime::from_timestamp(timestamp, 0)
        .ok_or_else(|| JwtError::Malformed(format!("timestamp out of range: {}", timestamp)))
}
