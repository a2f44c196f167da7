//! API Module
//!
//! HTTP handlers and routing for the portfolio REST API.
//!
//! # Endpoints
//! - `GET /changelog` - Commit history, cached with stale-on-error
//! - `GET /avatar` - GitHub avatar, lettered SVG fallback
//! - `GET|HEAD /icon` - Repository project icon, lettered SVG fallback
//! - `GET /social/:platform` - Recent posts from Bluesky or Twitter
//! - `GET /stats` - Per-cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod images;
pub mod resolve;
pub mod routes;

pub use handlers::*;
pub use images::{avatar_handler, icon_handler, CacheStatus, X_CACHE, X_PROJECT_ICON};
pub use resolve::{resolve_cached, Resolved};
pub use routes::create_router;
