use std::sync::Arc;

use async_trait::async_trait;
use auth::token_preview;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Duration;
use chrono::Utc;

use crate::domain::session::errors::RefreshTokenError;
use crate::domain::session::errors::SessionError;
use crate::domain::session::errors::UnauthorizedReason;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::RefreshToken;
use crate::domain::session::models::RefreshTokenState;
use crate::domain::session::models::Session;
use crate::domain::session::models::REFRESH_TOKEN_TTL_DAYS;
use crate::domain::session::ports::RefreshTokenRepository;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserServicePort;

/// Session manager: login, refresh and revoke over one refresh token store.
///
/// Holds no mutable state of its own; consistency between a racing revoke and
/// refresh is whatever the backing store provides.
pub struct SessionService<US, RR>
where
    US: UserServicePort,
    RR: RefreshTokenRepository,
{
    accounts: Arc<US>,
    refresh_tokens: Arc<RR>,
    authenticator: Arc<Authenticator>,
    refresh_token_ttl: Duration,
}

impl<US, RR> SessionService<US, RR>
where
    US: UserServicePort,
    RR: RefreshTokenRepository,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `accounts` - Account lookup collaborator
    /// * `refresh_tokens` - Refresh token persistence implementation
    /// * `authenticator` - Password verification and access token issuance
    pub fn new(
        accounts: Arc<US>,
        refresh_tokens: Arc<RR>,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        Self {
            accounts,
            refresh_tokens,
            authenticator,
            refresh_token_ttl: Duration::days(REFRESH_TOKEN_TTL_DAYS),
        }
    }

    fn issue_access_token(&self, user_id: &UserId) -> Result<String, SessionError> {
        self.authenticator
            .issue_access_token(user_id.0)
            .map_err(SessionError::TokenIssuance)
    }
}

#[async_trait]
impl<US, RR> SessionServicePort for SessionService<US, RR>
where
    US: UserServicePort,
    RR: RefreshTokenRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<Session, SessionError> {
        let user = match self.accounts.get_user_by_email(&command.email).await {
            Ok(user) => user,
            Err(UserError::NotFoundByEmail(_)) => {
                tracing::info!(email = %command.email, "Login failed: unknown email");
                return Err(SessionError::InvalidCredentials);
            }
            Err(e) => return Err(SessionError::DatabaseError(e.to_string())),
        };

        let access_token = self
            .authenticator
            .authenticate(&command.password, &user.password_hash, user.id.0)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::info!(user_id = %user.id, "Login failed: wrong password");
                    SessionError::InvalidCredentials
                }
                AuthenticationError::PasswordError(err) => SessionError::Password(err),
                AuthenticationError::AccessTokenError(err) => SessionError::TokenIssuance(err),
            })?;

        let refresh_token = auth::generate_refresh_token()?;
        let record = RefreshToken::new(refresh_token, user.id, Utc::now(), self.refresh_token_ttl);

        let record = self
            .refresh_tokens
            .create(record)
            .await
            // The owner was read moments ago; a rejected insert is a store failure
            .map_err(|e| SessionError::DatabaseError(e.to_string()))?;

        tracing::info!(user_id = %user.id, "Login successful");

        Ok(Session {
            user,
            access_token,
            refresh_token: record.token,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, SessionError> {
        let record = self.refresh_tokens.find_by_token(refresh_token).await?;

        let reason = match record.state_at(Utc::now()) {
            RefreshTokenState::Active => {
                let access_token = self.issue_access_token(&record.user_id)?;
                tracing::info!(user_id = %record.user_id, "Access token refreshed");
                return Ok(access_token);
            }
            RefreshTokenState::Revoked => UnauthorizedReason::RefreshTokenRevoked,
            RefreshTokenState::Expired => UnauthorizedReason::RefreshTokenExpired,
        };

        tracing::info!(
            reason = %reason,
            token_preview = %token_preview(refresh_token),
            "Refresh rejected"
        );
        Err(SessionError::Unauthorized(reason))
    }

    async fn revoke(&self, refresh_token: &str) -> Result<(), SessionError> {
        match self.refresh_tokens.find_by_token(refresh_token).await {
            Ok(_) => {}
            Err(RefreshTokenError::NotFound) => {
                tracing::info!(
                    token_preview = %token_preview(refresh_token),
                    "Attempt to revoke non-existent token"
                );
                return Ok(());
            }
            Err(e) => {
                tracing::error!(error = %e, "Refresh token lookup failed during revoke");
                return Ok(());
            }
        }

        self.refresh_tokens
            .revoke(refresh_token, Utc::now())
            .await
            .map_err(|e| SessionError::DatabaseError(e.to_string()))?;

        tracing::info!(
            token_preview = %token_preview(refresh_token),
            "Refresh token revoked"
        );
        Ok(())
    }

    fn authorize(&self, access_token: &str) -> Result<UserId, SessionError> {
        self.authenticator
            .validate_access_token(access_token)
            .map(UserId)
            .map_err(|e| SessionError::Unauthorized(UnauthorizedReason::AccessToken(e)))
    }

    async fn purge(&self) -> Result<(), SessionError> {
        self.refresh_tokens.delete_all().await?;
        tracing::warn!("All refresh tokens deleted");
        Ok(())
    }
}
