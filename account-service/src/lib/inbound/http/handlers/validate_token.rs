use axum::extract::State;

use super::ApiOutcome;
use super::ApiQuery;
use super::TokenQuery;
use crate::domain::account::models::TokenValidation;
use crate::inbound::http::router::AppState;

pub async fn validate_token(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<TokenQuery>,
) -> ApiOutcome<TokenValidation> {
    state.auth_service.validate(&query.access_token).await.into()
}
