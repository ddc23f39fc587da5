use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod session;
pub mod state;

use crate::state::AppState;

/// Assemble the HTTP surface. The diagnostics route is only mounted when enabled in config.
pub fn build_router(state: AppState) -> Router {
    // Frontend is served from a separate origin during development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .route("/", get(routes::home::landing_page))
        .route("/health", get(routes::health::health_check))
        .route(
            "/api/teams",
            get(routes::teams::list_teams)
                .head(routes::teams::method_not_allowed)
                .post(routes::teams::create_team)
                .fallback(routes::teams::method_not_allowed),
        )
        .route("/api/user", get(routes::user::current_user));

    if state.config.debug_routes {
        app = app.route("/api/debug/env", get(routes::debug::env_snapshot));
    }

    app.layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
