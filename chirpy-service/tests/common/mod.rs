#![allow(dead_code)]

pub mod db;

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::HashParams;
use auth::PasswordHasher;
use chirpy_service::config::Platform;
use chirpy_service::domain::session::errors::RefreshTokenError;
use chirpy_service::domain::session::models::RefreshToken;
use chirpy_service::domain::session::ports::RefreshTokenRepository;
use chirpy_service::domain::session::service::SessionService;
use chirpy_service::domain::user::errors::UserError;
use chirpy_service::domain::user::models::EmailAddress;
use chirpy_service::domain::user::models::User;
use chirpy_service::domain::user::models::UserId;
use chirpy_service::domain::user::ports::UserRepository;
use chirpy_service::domain::user::service::UserService;
use chirpy_service::inbound::http::router::create_router;
use chirpy_service::inbound::http::router::AppState;
use chrono::DateTime;
use chrono::Utc;
use serde_json::json;
use serde_json::Value;

pub const JWT_SECRET: &[u8] = b"integration-test-secret";
pub const POLKA_API_KEY: &str = "f271c81ff7084ee5b99a5091b42d486e";

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub refresh_tokens: Arc<InMemoryRefreshTokenRepository>,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_on(Platform::Dev).await
    }

    /// Spawn the application in a background task and return TestApp
    pub async fn spawn_on(platform: Platform) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        // Low-cost Argon2 parameters keep the suite fast
        let params = HashParams::new(8 * 1024, 1, 1, None).expect("valid argon2 params");
        let authenticator = Arc::new(Authenticator::with_password_hasher(
            JWT_SECRET,
            PasswordHasher::with_params(params.clone()),
        ));

        let users = Arc::new(InMemoryUserRepository::default());
        let refresh_tokens = Arc::new(InMemoryRefreshTokenRepository::default());

        let user_service = Arc::new(UserService::with_password_hasher(
            users,
            PasswordHasher::with_params(params),
        ));
        let session_service = Arc::new(SessionService::new(
            Arc::clone(&user_service),
            Arc::clone(&refresh_tokens),
            Arc::clone(&authenticator),
        ));

        let state = AppState {
            user_service,
            session_service,
            polka_api_key: Arc::from(POLKA_API_KEY),
            platform,
        };

        let router = create_router(state);
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            refresh_tokens,
            authenticator,
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    /// Register a user and return the response data
    pub async fn create_user(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/users")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }

    /// Log in and return the response data (id, token, refresh_token, ...)
    pub async fn login(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| u.email.as_str() == email).cloned())
    }

    async fn update(
        &self,
        id: &UserId,
        email: &EmailAddress,
        password_hash: &str,
    ) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.id != *id && u.email == *email) {
            return Err(UserError::EmailAlreadyExists(email.to_string()));
        }

        let user = users
            .get_mut(id)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;
        user.email = email.clone();
        user.password_hash = password_hash.to_string();
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn set_chirpy_red(&self, id: &UserId) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(id)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;
        user.is_chirpy_red = true;
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), UserError> {
        self.users.lock().unwrap().clear();
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryRefreshTokenRepository {
    tokens: Mutex<HashMap<String, RefreshToken>>,
}

impl InMemoryRefreshTokenRepository {
    pub fn len(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, RefreshTokenError> {
        let mut tokens = self.tokens.lock().unwrap();
        if tokens.contains_key(&token.token) {
            return Err(RefreshTokenError::ConstraintViolation(
                "duplicate token".to_string(),
            ));
        }
        tokens.insert(token.token.clone(), token.clone());
        Ok(token)
    }

    async fn find_by_token(&self, token: &str) -> Result<RefreshToken, RefreshTokenError> {
        self.tokens
            .lock()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(RefreshTokenError::NotFound)
    }

    async fn revoke(
        &self,
        token: &str,
        revoked_at: DateTime<Utc>,
    ) -> Result<(), RefreshTokenError> {
        let mut tokens = self.tokens.lock().unwrap();
        if let Some(record) = tokens.get_mut(token) {
            if record.revoked_at.is_none() {
                record.revoked_at = Some(revoked_at);
                record.updated_at = revoked_at;
            }
        }
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), RefreshTokenError> {
        self.tokens.lock().unwrap().clear();
        Ok(())
    }
}
