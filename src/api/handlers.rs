//! API Handlers
//!
//! Application state plus the JSON route handlers. Image routes live in
//! `images`.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::warn;

use crate::cache::{CacheStore, SharedCache, Sweep};
use crate::config::Config;
use crate::error::{AppError, FetchError, Result};
use crate::models::{
    ChangelogResponse, CommitRecord, HealthResponse, ImageAsset, Platform, ProjectIcon, RepoId,
    SocialFeedResponse, SocialQuery, StatsResponse,
};
use crate::upstream::{
    build_http_client, AvatarFetcher, CommitFetcher, GitHubClient, GitHubCommitLog, IconFetcher,
    LocalGitLog, SocialClient, SocialFetcher,
};

use super::resolve::{resolve_cached, Resolved};

/// Upper bound on the changelog store; it only ever holds one key per source
const CHANGELOG_CACHE_SIZE: usize = 16;

/// The per-route caches.
#[derive(Clone)]
pub struct Caches {
    pub changelog: SharedCache<Vec<CommitRecord>>,
    pub avatars: SharedCache<ImageAsset>,
    pub icons: SharedCache<ProjectIcon>,
}

impl Caches {
    pub fn from_config(config: &Config) -> Self {
        let grace = Duration::from_secs(config.stale_grace);

        Self {
            changelog: SharedCache::new(
                "changelog",
                CacheStore::new(CHANGELOG_CACHE_SIZE, Duration::from_secs(config.changelog_ttl))
                    .with_stale_grace(grace),
            ),
            avatars: SharedCache::new(
                "avatars",
                CacheStore::new(config.avatar_cache_size, Duration::from_secs(config.avatar_ttl))
                    .with_stale_grace(grace),
            ),
            icons: SharedCache::new(
                "icons",
                CacheStore::new(config.icon_cache_size, Duration::from_secs(config.icon_ttl))
                    .with_stale_grace(grace),
            ),
        }
    }

    /// Every store, for the background sweep.
    pub fn sweepers(&self) -> Vec<Arc<dyn Sweep>> {
        vec![
            Arc::new(self.changelog.clone()),
            Arc::new(self.avatars.clone()),
            Arc::new(self.icons.clone()),
        ]
    }
}

/// The upstream sources behind each route.
#[derive(Clone)]
pub struct Upstreams {
    pub commits: Arc<dyn CommitFetcher>,
    pub avatars: Arc<dyn AvatarFetcher>,
    pub icons: Arc<dyn IconFetcher>,
    pub social: Arc<dyn SocialFetcher>,
}

/// Handles used by `/social/:platform` when the query names none.
#[derive(Debug, Clone, PartialEq)]
pub struct SocialDefaults {
    pub bluesky_handle: String,
    pub twitter_username: String,
}

impl SocialDefaults {
    pub fn handle_for(&self, platform: Platform) -> &str {
        match platform {
            Platform::Bluesky => &self.bluesky_handle,
            Platform::Twitter => &self.twitter_username,
        }
    }
}

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub caches: Caches,
    pub upstreams: Upstreams,
    pub social_defaults: Arc<SocialDefaults>,
}

impl AppState {
    pub fn new(caches: Caches, upstreams: Upstreams, social_defaults: SocialDefaults) -> Self {
        Self {
            caches,
            upstreams,
            social_defaults: Arc::new(social_defaults),
        }
    }

    /// Wires the real upstream clients and caches from configuration.
    ///
    /// Commits come from `git log` in `CHANGELOG_LOCAL_PATH` when it is set,
    /// otherwise from `CHANGELOG_REPO` on GitHub.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(config.http_timeout);
        let http = build_http_client(timeout).context("failed to build HTTP client")?;
        let github = GitHubClient::from_config(http.clone(), config);

        let commits: Arc<dyn CommitFetcher> = match &config.changelog_local_path {
            Some(path) => Arc::new(LocalGitLog::new(path, timeout)),
            None => {
                let repo = RepoId::from_slug(&config.changelog_repo).with_context(|| {
                    format!("CHANGELOG_REPO must be owner/repo, got {:?}", config.changelog_repo)
                })?;
                Arc::new(GitHubCommitLog::new(github.clone(), repo))
            }
        };

        let github = Arc::new(github);
        let upstreams = Upstreams {
            commits,
            avatars: github.clone(),
            icons: github,
            social: Arc::new(SocialClient::from_config(http, config)),
        };
        let defaults = SocialDefaults {
            bluesky_handle: config.bluesky_handle.clone(),
            twitter_username: config.twitter_username.clone(),
        };

        Ok(Self::new(Caches::from_config(config), upstreams, defaults))
    }
}

/// Handler for GET /changelog
///
/// Serves the commit list from cache, refreshing it from the commit source
/// on a miss. A stale list is served with `stale: true` when the refresh
/// fails; with nothing cached the route fails with 500.
pub async fn changelog_handler(State(state): State<AppState>) -> Result<Json<ChangelogResponse>> {
    let fetcher = &state.upstreams.commits;
    let key = format!("changelog:{}", fetcher.source());

    let resolved = resolve_cached(&state.caches.changelog, &key, move || async move {
        fetcher.fetch_commits().await
    })
    .await;

    match resolved {
        Resolved::Hit { value, age } => Ok(Json(ChangelogResponse::cached(
            value,
            age.as_millis() as u64,
        ))),
        Resolved::Fresh(commits) => Ok(Json(ChangelogResponse::fresh(commits))),
        Resolved::Stale { value, .. } => Ok(Json(ChangelogResponse::stale(value))),
        Resolved::Unavailable(_) => Err(AppError::Upstream("Failed to fetch commits".to_string())),
    }
}

/// Handler for GET /social/:platform
///
/// Not cached: every request goes to the provider.
pub async fn social_handler(
    State(state): State<AppState>,
    Path(platform): Path<String>,
    Query(query): Query<SocialQuery>,
) -> Result<Json<SocialFeedResponse>> {
    let platform: Platform = platform.parse().map_err(AppError::InvalidInput)?;
    let (handle, limit) = query.validate().map_err(AppError::InvalidInput)?;
    let handle =
        handle.unwrap_or_else(|| state.social_defaults.handle_for(platform).to_string());

    match state.upstreams.social.fetch_posts(platform, &handle, limit).await {
        Ok(posts) => Ok(Json(SocialFeedResponse { posts })),
        Err(FetchError::NotConfigured(what)) => {
            Err(AppError::Internal(format!("{what} is not configured")))
        }
        Err(e) => {
            warn!(%platform, handle = %handle, error = %e, "Social feed fetch failed");
            Err(AppError::Upstream(format!("Failed to fetch {platform} posts")))
        }
    }
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        avatars: state.caches.avatars.stats().await.into(),
        icons: state.caches.icons.stats().await.into(),
        changelog: state.caches.changelog.stats().await.into(),
    })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
