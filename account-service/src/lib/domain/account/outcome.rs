use serde::Serialize;

use crate::domain::account::errors::AuthError;
use crate::domain::account::errors::ErrorKind;

/// Uniform envelope returned by every authentication operation.
///
/// Failures are reported here, never as an `Err` across the service
/// boundary. `error` is present exactly when `success` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome<T> {
    pub success: bool,
    pub messages: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
}

impl<T> Outcome<T> {
    pub fn success(payload: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            messages: vec![message.into()],
            payload: Some(payload),
            error: None,
        }
    }

    pub fn failure(err: &AuthError) -> Self {
        Self {
            success: false,
            messages: vec![err.to_string()],
            payload: None,
            error: Some(err.kind()),
        }
    }

    /// Failed outcome that still explains itself through a payload.
    pub fn failure_with(payload: T, err: &AuthError) -> Self {
        Self {
            payload: Some(payload),
            ..Self::failure(err)
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn error(&self) -> Option<ErrorKind> {
        self.error
    }
}

impl Outcome<()> {
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            success: true,
            messages: vec![message.into()],
            payload: None,
            error: None,
        }
    }
}
