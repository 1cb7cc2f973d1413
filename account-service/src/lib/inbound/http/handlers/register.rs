use axum::extract::State;

use super::ApiJson;
use super::ApiOutcome;
use super::CredentialsRequest;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CredentialsRequest>,
) -> ApiOutcome<()> {
    state
        .auth_service
        .register(&body.email, &body.password)
        .await
        .into()
}
