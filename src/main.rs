use std::error::Error;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use volley_league::config::{AppConfig, APP_ENV_VAR};
use volley_league::session::JwtSessionProvider;
use volley_league::state::AppState;
use volley_league::{build_router, db};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting volley league server...");

    let config = AppConfig::from_env()?;

    let pool = db::connect(&config.database_url, config.database_max_connections).await?;
    db::migrate(&pool).await?;

    tracing::info!("Database connection established.");

    if config.debug_routes && config.is_production() {
        tracing::warn!("debug routes are enabled in production");
    }

    let sessions = Arc::new(JwtSessionProvider::new(
        config.auth_secret.as_deref(),
        config.session_cookie.clone(),
        std::env::var(APP_ENV_VAR).ok(),
    ));

    let addr = config.addr();
    let app = build_router(AppState::new(pool, sessions, config));

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
