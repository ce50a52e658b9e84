use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::UNAUTHORIZED_MESSAGE;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

const USER_UPGRADED_EVENT: &str = "user.upgraded";

/// Payment provider webhook. Authenticated by the static `ApiKey` scheme, never
/// by a session token.
pub async fn polka_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let key = auth::extract_api_key(&headers).map_err(|e| {
        tracing::warn!(error = %e, "Missing or invalid API key");
        ApiError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string())
    })?;

    if !auth::verify_api_key(key, &state.polka_api_key) {
        tracing::warn!("Invalid Polka API key");
        return Err(ApiError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string()));
    }

    let payload: PolkaWebhookRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid JSON: {}", e)))?;

    if payload.event != USER_UPGRADED_EVENT {
        tracing::debug!(event = %payload.event, "Ignoring Polka event");
        return Ok(StatusCode::NO_CONTENT);
    }

    let user_id = UserId::from_string(&payload.data.user_id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid user_id: {}", e)))?;

    state
        .user_service
        .upgrade_to_chirpy_red(&user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Clone, Deserialize)]
pub struct PolkaWebhookRequest {
    pub event: String,
    pub data: PolkaWebhookData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PolkaWebhookData {
    pub user_id: String,
}
