//! Portfolio API - caching backend for a personal portfolio site
//!
//! Serves a commit changelog, GitHub avatars, project icons and social
//! feeds, with TTL caches, stale-on-error fallback and generated SVG
//! placeholders.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod fallback;
pub mod models;
pub mod tasks;
pub mod upstream;

pub use api::{create_router, AppState};
pub use config::Config;
pub use tasks::spawn_cleanup_task;
