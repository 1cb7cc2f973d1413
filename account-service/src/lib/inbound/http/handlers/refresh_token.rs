use axum::extract::State;

use super::ApiJson;
use super::ApiOutcome;
use super::CredentialsRequest;
use crate::inbound::http::router::AppState;

/// Re-proves identity with credentials; a previously issued token alone is
/// not enough to obtain a new one.
pub async fn refresh_token(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CredentialsRequest>,
) -> ApiOutcome<String> {
    state
        .auth_service
        .refresh(&body.email, &body.password)
        .await
        .into()
}
