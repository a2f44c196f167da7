//! API Routes
//!
//! Configures the Axum router with all portfolio endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    changelog_handler, health_handler, social_handler, stats_handler, AppState,
};
use super::images::{avatar_handler, icon_handler};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /changelog` - Commit history of the portfolio repository
/// - `GET /avatar?username=` - GitHub avatar image
/// - `GET|HEAD /icon?repoUrl=` - Project icon image
/// - `GET /social/:platform` - Recent Bluesky or Twitter posts
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// `HEAD` is answered by the `GET` handlers with the body stripped.
pub fn create_router(state: AppState) -> Router {
    // Portfolio frontends call these endpoints from the browser
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/changelog", get(changelog_handler))
        .route("/avatar", get(avatar_handler))
        .route("/icon", get(icon_handler))
        .route("/social/:platform", get(social_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
