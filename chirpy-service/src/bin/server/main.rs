use std::sync::Arc;

use auth::Authenticator;
use chirpy_service::config::Config;
use chirpy_service::config::Platform;
use chirpy_service::domain::session::service::SessionService;
use chirpy_service::domain::user::service::UserService;
use chirpy_service::inbound::http::router::create_router;
use chirpy_service::inbound::http::router::AppState;
use chirpy_service::outbound::repositories::PostgresRefreshTokenRepository;
use chirpy_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn init_tracing(platform: Platform) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "chirpy_service=debug,auth=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);
    match platform {
        Platform::Prod => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        Platform::Dev => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::load()?;

    init_tracing(config.platform);

    tracing::info!(
        service = "chirpy-service",
        version = env!("CARGO_PKG_VERSION"),
        platform = ?config.platform,
        http_port = config.server.http_port,
        "Service starting"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes()));
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let refresh_token_repository = Arc::new(PostgresRefreshTokenRepository::new(pg_pool));

    let user_service = Arc::new(UserService::new(user_repository));
    let session_service = Arc::new(SessionService::new(
        Arc::clone(&user_service),
        refresh_token_repository,
        authenticator,
    ));

    let state = AppState {
        user_service,
        session_service,
        polka_api_key: Arc::from(config.polka.api_key.as_str()),
        platform: config.platform,
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state)).await?;

    tracing::info!("Server exited successfully");
    Ok(())
}
