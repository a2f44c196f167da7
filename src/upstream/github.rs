//! GitHub Client
//!
//! Commit history, user avatars and project icon discovery.

use async_trait::async_trait;
use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    Client, RequestBuilder, StatusCode, Url,
};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{FetchError, FetchResult};
use crate::models::{CommitRecord, ImageAsset, RepoId};

use super::types::{GitHubCommitItem, GitHubRepository, GitHubUser};
use super::{ensure_success, join_url, AvatarFetcher, CommitFetcher, IconFetcher};

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const COMMITS_PER_PAGE: usize = 100;

/// Extensions tried for `project-icon.<ext>`, in order.
pub const ICON_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "svg", "webp", "ico", "avif"];

/// Branches tried when the default branch cannot be resolved.
pub const ICON_BRANCH_FALLBACKS: [&str; 2] = ["main", "master"];

/// GitHub REST and raw-content client.
#[derive(Clone)]
pub struct GitHubClient {
    http: Client,
    api_base: String,
    raw_base: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Create a client against explicit API and raw-content hosts.
    pub fn new(http: Client, api_base: impl Into<String>, raw_base: impl Into<String>) -> Self {
        Self {
            http,
            api_base: api_base.into(),
            raw_base: raw_base.into(),
            token: None,
        }
    }

    /// Create a client from configuration.
    pub fn from_config(http: Client, config: &Config) -> Self {
        Self::new(http, &config.github_api_base, &config.github_raw_base)
            .with_token(config.github_token.clone())
    }

    /// Send `token` as a bearer token on API calls (not on raw downloads).
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    fn api_request(&self, url: Url) -> RequestBuilder {
        let request = self.http.get(url).header(ACCEPT, GITHUB_ACCEPT);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> FetchResult<T> {
        let response = ensure_success(request.send().await?, what)?;
        Ok(response.json::<T>().await?)
    }

    /// Download a file, using `fallback_type` if the response names none.
    async fn download(&self, url: Url, fallback_type: &str) -> FetchResult<ImageAsset> {
        let response = ensure_success(self.http.get(url.clone()).send().await?, url.as_str())?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| fallback_type.to_string());
        let bytes = response.bytes().await?;
        Ok(ImageAsset::new(bytes, content_type))
    }

    // == Commits ==
    /// List every commit of `repo`, following pagination until a short page.
    ///
    /// Any page failing makes the whole listing fail.
    pub async fn list_commits(&self, repo: &RepoId) -> FetchResult<Vec<CommitRecord>> {
        let url = join_url(
            &self.api_base,
            &["repos", repo.owner.as_str(), repo.repo.as_str(), "commits"],
        )?;
        let mut commits = Vec::new();
        let mut page = 1u32;

        loop {
            let request = self.api_request(url.clone()).query(&[
                ("per_page", COMMITS_PER_PAGE.to_string()),
                ("page", page.to_string()),
            ]);
            let items: Vec<GitHubCommitItem> = self
                .get_json(request, &format!("commits of {repo} (page {page})"))
                .await
                .map_err(|e| match e {
                    FetchError::NotFound(what) => FetchError::Upstream(format!("{what} not found")),
                    other => other,
                })?;

            let count = items.len();
            commits.extend(items.into_iter().map(|item| {
                let (author, date) = item
                    .commit
                    .author
                    .map(|a| (a.name, a.date))
                    .unwrap_or_default();
                CommitRecord::new(item.sha, date, author, &item.commit.message)
            }));
            debug!(repo = %repo, page, count, "Fetched commit page");

            if count < COMMITS_PER_PAGE {
                break;
            }
            page += 1;
        }

        Ok(commits)
    }

    // == Avatar ==
    /// Resolve the user's avatar URL, then download the image.
    pub async fn avatar(&self, username: &str) -> FetchResult<ImageAsset> {
        let url = join_url(&self.api_base, &["users", username])?;
        let user: GitHubUser = self
            .get_json(self.api_request(url), &format!("GitHub user {username}"))
            .await
            .map_err(|e| match e {
                e @ (FetchError::NotFound(_) | FetchError::NotConfigured(_)) => e,
                other => FetchError::NotFound(format!("GitHub user {username}: {other}")),
            })?;

        let avatar_url = user
            .avatar_url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| FetchError::NotFound(format!("avatar of {username}")))?;
        let avatar_url = Url::parse(&avatar_url)
            .map_err(|e| FetchError::Decode(format!("avatar_url {avatar_url:?}: {e}")))?;

        self.download(avatar_url, "image/jpeg")
            .await
            .map_err(|e| FetchError::Upstream(format!("avatar image download failed: {e}")))
    }

    // == Project Icon ==
    /// Resolve the repository's default branch.
    pub async fn default_branch(&self, repo: &RepoId) -> FetchResult<String> {
        let url = join_url(&self.api_base, &["repos", repo.owner.as_str(), repo.repo.as_str()])?;
        let info: GitHubRepository = self
            .get_json(self.api_request(url), &format!("repository {repo}"))
            .await?;
        info.default_branch
            .filter(|b| !b.is_empty())
            .ok_or_else(|| FetchError::Decode(format!("{repo} has no default_branch")))
    }

    /// Find `project-icon.<ext>` on the default branch (or `main`/`master`).
    ///
    /// Returns `Ok(None)` only when every candidate file answered 404. Any
    /// other status, a transport failure or a failed download after a
    /// successful HEAD makes the lookup an error.
    pub async fn project_icon(&self, repo: &RepoId) -> FetchResult<Option<ImageAsset>> {
        let branches: Vec<String> = match self.default_branch(repo).await {
            Ok(branch) => vec![branch],
            Err(e) => {
                debug!(repo = %repo, error = %e, "Default branch lookup failed, trying fallbacks");
                ICON_BRANCH_FALLBACKS.iter().map(|b| b.to_string()).collect()
            }
        };

        let mut last_error = None;

        for branch in &branches {
            for ext in ICON_EXTENSIONS {
                let file = format!("project-icon.{ext}");
                let url = join_url(
                    &self.raw_base,
                    &[repo.owner.as_str(), repo.repo.as_str(), branch.as_str(), file.as_str()],
                )?;

                match self.http.head(url.clone()).send().await {
                    Ok(head) if head.status().is_success() => {
                        match self.download(url, icon_content_type(ext)).await {
                            Ok(image) => {
                                debug!(repo = %repo, branch = %branch, ext, "Found project icon");
                                return Ok(Some(image));
                            }
                            Err(e) => {
                                warn!(repo = %repo, ext, error = %e, "Icon download failed after HEAD");
                                last_error = Some(FetchError::Upstream(format!(
                                    "icon download failed after HEAD: {e}"
                                )));
                            }
                        }
                    }
                    Ok(head) if head.status() == StatusCode::NOT_FOUND => {}
                    Ok(head) => {
                        last_error = Some(FetchError::Upstream(format!(
                            "{url} returned {}",
                            head.status()
                        )));
                    }
                    Err(e) => last_error = Some(FetchError::from(e)),
                }
            }
        }

        match last_error {
            Some(e) => Err(e),
            None => Ok(None),
        }
    }
}

/// Content type assumed for an icon extension when the host sends none.
pub fn icon_content_type(ext: &str) -> &'static str {
    match ext {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl AvatarFetcher for GitHubClient {
    async fn fetch_avatar(&self, username: &str) -> FetchResult<ImageAsset> {
        self.avatar(username).await
    }
}

#[async_trait]
impl IconFetcher for GitHubClient {
    async fn fetch_icon(&self, repo: &RepoId) -> FetchResult<Option<ImageAsset>> {
        self.project_icon(repo).await
    }
}

/// Commit history of one GitHub repository.
#[derive(Clone)]
pub struct GitHubCommitLog {
    client: GitHubClient,
    repo: RepoId,
}

impl GitHubCommitLog {
    pub fn new(client: GitHubClient, repo: RepoId) -> Self {
        Self { client, repo }
    }
}

#[async_trait]
impl CommitFetcher for GitHubCommitLog {
    fn source(&self) -> String {
        self.repo.to_string()
    }

    async fn fetch_commits(&self) -> FetchResult<Vec<CommitRecord>> {
        self.client.list_commits(&self.repo).await
    }
}
