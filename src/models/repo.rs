//! Repository identifiers
//!
//! Parsing of `owner/repo` pairs from config values and repository URLs.

use std::fmt;

use reqwest::Url;

/// A GitHub repository, identified by owner and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Parses a bare `owner/repo` slug.
    pub fn from_slug(slug: &str) -> Option<Self> {
        let mut parts = slug.trim().trim_matches('/').split('/');
        let owner = parts.next().filter(|s| !s.is_empty())?;
        let repo = parts.next().filter(|s| !s.is_empty())?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::new(owner, strip_git_suffix(repo)))
    }

    /// Extracts owner and repository from a repository URL such as
    /// `https://github.com/owner/repo` or `https://github.com/owner/repo.git/tree/main`.
    ///
    /// Only the first two path segments matter; anything after is ignored.
    pub fn from_url(url: &str) -> Option<Self> {
        let parsed = Url::parse(url.trim()).ok()?;
        let mut segments = parsed.path_segments()?.filter(|s| !s.is_empty());
        let owner = segments.next()?;
        let repo = strip_git_suffix(segments.next()?);
        if repo.is_empty() {
            return None;
        }
        Some(Self::new(owner, repo))
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

fn strip_git_suffix(repo: &str) -> &str {
    repo.strip_suffix(".git").unwrap_or(repo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_url() {
        let id = RepoId::from_url("https://github.com/LunarcatOwO/portfolio-v2").unwrap();
        assert_eq!(id, RepoId::new("LunarcatOwO", "portfolio-v2"));
        assert_eq!(id.to_string(), "LunarcatOwO/portfolio-v2");
    }

    #[test]
    fn test_from_url_ignores_extra_segments_and_git_suffix() {
        let id = RepoId::from_url("https://github.com/owner/repo.git/tree/main/src").unwrap();
        assert_eq!(id, RepoId::new("owner", "repo"));

        let id = RepoId::from_url("https://github.com//owner//repo/").unwrap();
        assert_eq!(id, RepoId::new("owner", "repo"));
    }

    #[test]
    fn test_from_url_rejects_invalid() {
        assert!(RepoId::from_url("not a url").is_none());
        assert!(RepoId::from_url("https://github.com/owner").is_none());
        assert!(RepoId::from_url("https://github.com/").is_none());
        assert!(RepoId::from_url("github.com/owner/repo").is_none());
    }

    #[test]
    fn test_from_slug() {
        assert_eq!(RepoId::from_slug("a/b"), Some(RepoId::new("a", "b")));
        assert_eq!(RepoId::from_slug("/a/b.git/"), Some(RepoId::new("a", "b")));
        assert!(RepoId::from_slug("a").is_none());
        assert!(RepoId::from_slug("a/b/c").is_none());
        assert!(RepoId::from_slug("").is_none());
    }
}
