use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::ApiError;
use crate::domain::session::errors::SessionError;
use crate::inbound::http::router::AppState;

pub async fn revoke(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let refresh_token = auth::extract_bearer(&headers).map_err(SessionError::from)?;

    state.session_service.revoke(refresh_token).await?;

    Ok(StatusCode::NO_CONTENT)
}
