use axum::extract::State;

use super::ApiOutcome;
use super::ApiQuery;
use super::TokenQuery;
use crate::inbound::http::router::AppState;

pub async fn logout(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<TokenQuery>,
) -> ApiOutcome<()> {
    state.auth_service.logout(&query.access_token).await.into()
}
