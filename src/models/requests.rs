//! Request DTOs for the portfolio API
//!
//! Query strings accepted by each route, with validation.

use serde::Deserialize;

use crate::models::RepoId;

/// Default number of posts returned by the social routes
pub const DEFAULT_POST_LIMIT: u32 = 5;
/// Largest `limit` accepted by the social routes
pub const MAX_POST_LIMIT: u32 = 100;

/// Query for `GET /avatar`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvatarQuery {
    pub username: Option<String>,
}

impl AvatarQuery {
    /// Returns the trimmed username or an error message.
    pub fn validate(&self) -> Result<String, String> {
        match self.username.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Ok(name.to_string()),
            _ => Err("Username is required".to_string()),
        }
    }
}

/// Query for `GET|HEAD /icon`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IconQuery {
    #[serde(rename = "repoUrl")]
    pub repo_url: Option<String>,
}

impl IconQuery {
    /// Returns the parsed repository or an error message.
    pub fn validate(&self) -> Result<RepoId, String> {
        let url = self
            .repo_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| "Repository URL is required".to_string())?;

        RepoId::from_url(url).ok_or_else(|| "Invalid GitHub URL".to_string())
    }
}

/// Query for `GET /social/:platform`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SocialQuery {
    /// Handle (Bluesky) or username (Twitter)
    pub handle: Option<String>,
    /// Alias of `handle` accepted for the Twitter route
    pub username: Option<String>,
    /// Raw limit; parsed by `validate` so bad values become a 400
    pub limit: Option<String>,
}

impl SocialQuery {
    /// Returns the requested handle (if any) and the post limit.
    pub fn validate(&self) -> Result<(Option<String>, u32), String> {
        let handle = self
            .handle
            .as_deref()
            .or(self.username.as_deref())
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(str::to_string);

        let limit = match self.limit.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_POST_LIMIT,
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|n| (1..=MAX_POST_LIMIT).contains(n))
                .ok_or_else(|| format!("limit must be between 1 and {MAX_POST_LIMIT}"))?,
        };

        Ok((handle, limit))
    }
}
