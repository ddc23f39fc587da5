use axum::extract::FromRef;
use sqlx::sqlite::SqlitePool;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::session::SessionProvider;

/// Shared handles injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub sessions: Arc<dyn SessionProvider>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(pool: SqlitePool, sessions: Arc<dyn SessionProvider>, config: AppConfig) -> Self {
        AppState {
            pool,
            sessions,
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Arc<dyn SessionProvider> {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}
