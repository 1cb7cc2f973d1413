use axum::extract::State;

use super::ApiJson;
use super::ApiOutcome;
use super::CredentialsRequest;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CredentialsRequest>,
) -> ApiOutcome<String> {
    state
        .auth_service
        .login(&body.email, &body.password)
        .await
        .into()
}
