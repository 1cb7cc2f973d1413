use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::QueryRejection;
use axum::extract::FromRequest;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::account::errors::AuthError;
use crate::domain::account::errors::ErrorKind;
use crate::domain::account::outcome::Outcome;

pub mod login;
pub mod logout;
pub mod refresh_token;
pub mod register;
pub mod validate_token;

/// HTTP wrapper around an `Outcome`; the body is always the outcome itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiOutcome<T: Serialize>(pub Outcome<T>);

impl<T: Serialize> ApiOutcome<T> {
    pub fn status_code(&self) -> StatusCode {
        match self.0.error {
            None => StatusCode::OK,
            Some(kind) => status_for(kind),
        }
    }
}

impl<T: Serialize> From<Outcome<T>> for ApiOutcome<T> {
    fn from(outcome: Outcome<T>) -> Self {
        Self(outcome)
    }
}

impl<T: Serialize> IntoResponse for ApiOutcome<T> {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.0)).into_response()
    }
}

/// Response for a request whose body or query string cannot be read.
pub type ApiRejection = ApiOutcome<()>;

impl ApiRejection {
    fn bad_request(detail: String) -> Self {
        tracing::debug!(%detail, "Request rejected before reaching the service");
        Self(Outcome::failure(&AuthError::BadRequest(detail)))
    }
}

impl From<JsonRejection> for ApiRejection {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiRejection {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

/// `Json` extractor whose rejection is a failed outcome.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiRejection))]
pub struct ApiJson<T>(pub T);

/// `Query` extractor whose rejection is a failed outcome.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiRejection))]
pub struct ApiQuery<T>(pub T);

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::DuplicateEmail => StatusCode::CONFLICT,
        ErrorKind::BadCredentials | ErrorKind::TokenInvalid | ErrorKind::TokenExpired => {
            StatusCode::UNAUTHORIZED
        }
        ErrorKind::AccountNotFound => StatusCode::NOT_FOUND,
        ErrorKind::InvalidEmail => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
        ErrorKind::StorageError | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// JSON body shared by register, login and refresh.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Query string shared by validate and logout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenQuery {
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let ok = ApiOutcome(Outcome::done("ok"));
        assert_eq!(ok.status_code(), StatusCode::OK);

        let cases = [
            (AuthError::DuplicateEmail("a@x.com".to_string()), StatusCode::CONFLICT),
            (AuthError::BadCredentials, StatusCode::UNAUTHORIZED),
            (AuthError::TokenExpired, StatusCode::UNAUTHORIZED),
            (AuthError::AccountNotFound("a@x.com".to_string()), StatusCode::NOT_FOUND),
            (AuthError::BadRequest("no body".to_string()), StatusCode::BAD_REQUEST),
            (AuthError::Storage("down".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            let outcome: ApiOutcome<()> = ApiOutcome(Outcome::failure(&err));
            assert_eq!(outcome.status_code(), expected, "{}", err);
        }
    }
}
