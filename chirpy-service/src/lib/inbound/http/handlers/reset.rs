use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use crate::config::Platform;
use crate::inbound::http::router::AppState;

/// Wipes sessions and accounts. Only available on the dev platform.
pub async fn reset(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    if state.platform != Platform::Dev {
        tracing::warn!(platform = ?state.platform, "Reset attempted outside dev");
        return Err(ApiError::Forbidden("Reset only allowed in dev".to_string()));
    }

    state.session_service.purge().await?;
    state.user_service.reset().await?;

    tracing::info!("Reset completed");
    Ok(StatusCode::OK)
}
