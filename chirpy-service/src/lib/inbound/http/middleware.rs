use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::session::errors::SessionError;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store authenticated user ID in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that validates bearer access tokens and adds the caller identity to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let user_id = authorize_request(&state, &req).map_err(|e| {
        tracing::warn!(path = %req.uri().path(), "Access token rejected");
        ApiError::from(e).into_response()
    })?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

fn authorize_request(state: &AppState, req: &Request) -> Result<UserId, SessionError> {
    let token = auth::extract_bearer(req.headers())?;
    state.session_service.authorize(token)
}
