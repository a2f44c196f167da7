//! Upstream Fetchers
//!
//! Stateless clients for the third-party APIs behind each route. Route
//! handlers only see the traits below, so any source can be swapped out
//! (a local checkout instead of GitHub, a stub in tests).

mod git_log;
mod github;
mod social;
mod types;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};

use crate::error::{FetchError, FetchResult};
use crate::models::{CommitRecord, ImageAsset, Platform, RepoId, SocialPost};

pub use git_log::{parse_git_log, LocalGitLog};
pub use github::{GitHubClient, GitHubCommitLog, ICON_BRANCH_FALLBACKS, ICON_EXTENSIONS};
pub use social::SocialClient;

/// User agent sent with every outbound request
pub const USER_AGENT: &str = "portfolio-api";

// == Fetcher Traits ==

/// Source of the changelog.
#[async_trait]
pub trait CommitFetcher: Send + Sync {
    /// Identifies the source in cache keys, e.g. `owner/repo`.
    fn source(&self) -> String;

    /// Retrieves the full commit list, newest first.
    async fn fetch_commits(&self) -> FetchResult<Vec<CommitRecord>>;
}

/// Source of user avatars.
#[async_trait]
pub trait AvatarFetcher: Send + Sync {
    async fn fetch_avatar(&self, username: &str) -> FetchResult<ImageAsset>;
}

/// Source of repository icons.
#[async_trait]
pub trait IconFetcher: Send + Sync {
    /// `Ok(None)` means the repository has no icon file.
    async fn fetch_icon(&self, repo: &RepoId) -> FetchResult<Option<ImageAsset>>;
}

/// Source of recent social posts.
#[async_trait]
pub trait SocialFetcher: Send + Sync {
    async fn fetch_posts(
        &self,
        platform: Platform,
        handle: &str,
        limit: u32,
    ) -> FetchResult<Vec<SocialPost>>;
}

// == HTTP Helpers ==

/// Builds the shared outbound client with a bounded timeout.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(5)))
        .user_agent(USER_AGENT)
        .build()
}

/// Converts a non-success status into a [`FetchError`].
///
/// 404 is `NotFound`; every other failure status is `Upstream`.
pub(crate) fn ensure_success(response: Response, what: &str) -> FetchResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else if status == StatusCode::NOT_FOUND {
        Err(FetchError::NotFound(what.to_string()))
    } else {
        Err(FetchError::Upstream(format!("{what} returned {status}")))
    }
}

/// Builds `base` + escaped path `segments`.
pub(crate) fn join_url(base: &str, segments: &[&str]) -> FetchResult<reqwest::Url> {
    let mut url = reqwest::Url::parse(base)
        .map_err(|e| FetchError::NotConfigured(format!("base URL {base:?} ({e})")))?;
    url.path_segments_mut()
        .map_err(|_| FetchError::NotConfigured(format!("base URL {base:?}")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url_escapes_segments() {
        let url = join_url("https://api.github.com", &["users", "a b/c"]).unwrap();
        assert_eq!(url.as_str(), "https://api.github.com/users/a%20b%2Fc");
    }

    #[test]
    fn test_join_url_keeps_base_path() {
        let url = join_url("http://localhost:8080/proxy/", &["repos", "o", "r"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/proxy/repos/o/r");
    }

    #[test]
    fn test_join_url_rejects_bad_base() {
        assert!(matches!(
            join_url("not a url", &["x"]),
            Err(FetchError::NotConfigured(_))
        ));
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(Duration::from_secs(10)).is_ok());
    }
}
